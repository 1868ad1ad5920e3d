//! Tests for fill order iteration

#[cfg(test)]
mod tests {
    use squaregrid::GridError;
    use squaregrid::generator::fill::FillDirection;
    use squaregrid::grid::coordinate::GridCoordinate;

    fn order(direction: FillDirection, width: u32, height: u32) -> Vec<(u32, u32)> {
        direction
            .cells(width, height)
            .map(|c| (c.column, c.row))
            .collect()
    }

    // Tests horizontal fill walks each row before the next
    // Verified by swapping the loop nesting
    #[test]
    fn test_horizontal_order() {
        assert_eq!(
            order(FillDirection::Horizontal, 3, 2),
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
    }

    // Tests vertical fill walks each column before the next
    // Verified by reusing the horizontal order
    #[test]
    fn test_vertical_order() {
        assert_eq!(
            order(FillDirection::Vertical, 3, 2),
            vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]
        );
    }

    // Tests both directions visit the same cells
    // Verified by stopping vertical fill one column early
    #[test]
    fn test_directions_cover_same_cells() {
        let mut horizontal: Vec<GridCoordinate> = FillDirection::Horizontal.cells(5, 4).collect();
        let mut vertical: Vec<GridCoordinate> = FillDirection::Vertical.cells(5, 4).collect();
        horizontal.sort();
        vertical.sort();

        assert_eq!(horizontal.len(), 20);
        assert_eq!(horizontal, vertical);
    }

    // Tests degenerate dimensions produce no cells
    // Verified by yielding the origin for any size
    #[test]
    fn test_zero_dimensions() {
        for direction in [FillDirection::Horizontal, FillDirection::Vertical] {
            assert!(order(direction, 0, 5).is_empty());
            assert!(order(direction, 5, 0).is_empty());
            assert!(order(direction, 0, 0).is_empty());
        }
    }

    // Tests the remaining length shrinks as cells are taken
    // Verified by reporting the total size throughout
    #[test]
    fn test_exact_size() {
        let mut cells = FillDirection::Vertical.cells(4, 3);
        assert_eq!(cells.len(), 12);

        cells.next();
        cells.next();
        cells.next();
        cells.next();
        assert_eq!(cells.len(), 8);

        assert_eq!(cells.by_ref().count(), 8);
        assert_eq!(cells.len(), 0);
        assert_eq!(cells.next(), None);
    }

    // Tests parsing, display and default direction
    // Verified by defaulting to vertical
    #[test]
    fn test_parse_and_display() {
        assert_eq!(FillDirection::default(), FillDirection::Horizontal);
        assert_eq!("V".parse::<FillDirection>().unwrap(), FillDirection::Vertical);
        assert_eq!(
            "horizontal".parse::<FillDirection>().unwrap(),
            FillDirection::Horizontal
        );
        assert_eq!(FillDirection::Vertical.to_string(), "vertical");

        let error = "diagonal".parse::<FillDirection>().unwrap_err();
        assert!(matches!(error, GridError::InvalidParameter { parameter: "direction", .. }));
    }
}
