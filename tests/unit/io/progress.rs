//! Tests for cell progress tracking

#[cfg(test)]
mod tests {
    use squaregrid::io::configuration::PROGRESS_MIN_CELLS;
    use squaregrid::io::progress::ProgressManager;

    // Tests ticks are counted between start and finish
    // Verified by incrementing by two per tick
    #[test]
    fn test_progress_counts_ticks() {
        let mut pm = ProgressManager::hidden();
        pm.start("generate", 10);

        for _ in 0..4 {
            pm.tick();
        }
        assert_eq!(pm.position(), 4);

        pm.finish("done");
        assert_eq!(pm.position(), 0);
    }

    // Tests ticking without an active bar is harmless
    // Verified by creating a bar on demand in tick
    #[test]
    fn test_tick_without_start() {
        let mut pm = ProgressManager::default();
        pm.tick();
        assert_eq!(pm.position(), 0);
        pm.finish("nothing");
    }

    // Tests restarting discards the previous count
    // Verified by reusing the existing bar on start
    #[test]
    fn test_restart_resets_position() {
        let mut pm = ProgressManager::hidden();
        pm.start("first", 5);
        pm.tick();
        pm.tick();

        pm.start("second", 5);
        assert_eq!(pm.position(), 0);
        pm.tick();
        assert_eq!(pm.position(), 1);
        pm.finish("done");
    }

    // Tests large operations track progress even when drawing is enabled
    // Verified by skipping the increment for drawn bars
    #[test]
    fn test_large_operation() {
        let mut pm = ProgressManager::new();
        pm.start("generate", PROGRESS_MIN_CELLS * 2);
        pm.tick();
        assert_eq!(pm.position(), 1);
        pm.finish("done");
    }
}
