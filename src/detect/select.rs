//! Default box selection
//!
//! After a successful non-empty detection pass one box becomes the default
//! selection: the one with the largest area. A stable left fold keeps the
//! first occurrence on ties; the input is never reordered.

use super::DetectionBox;

/// Pick the box with the maximum `width * height`.
///
/// Ties go to the earliest box in emission order. Returns `None` only for
/// an empty slice.
pub fn largest_box(boxes: &[DetectionBox]) -> Option<&DetectionBox> {
    boxes.iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.area() <= current.area() => Some(current),
        _ => Some(candidate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(id: u32, width: f32, height: f32) -> DetectionBox {
        DetectionBox {
            id,
            x: 0.0,
            y: 0.0,
            width,
            height,
            text: String::new(),
            confidence: 1.0,
        }
    }

    #[test]
    fn test_empty_slice_selects_nothing() {
        assert!(largest_box(&[]).is_none());
    }

    #[test]
    fn test_single_box_is_selected() {
        let boxes = vec![boxed(1, 10.0, 10.0)];
        assert_eq!(largest_box(&boxes).unwrap().id, 1);
    }

    #[test]
    fn test_largest_area_wins() {
        let boxes = vec![
            boxed(1, 10.0, 5.0),
            boxed(2, 30.0, 20.0),
            boxed(3, 4.0, 4.0),
        ];
        assert_eq!(largest_box(&boxes).unwrap().id, 2);
    }

    #[test]
    fn test_tie_goes_to_first_occurrence() {
        // Areas 200, 500, 500, 100: the tie at indexes 1 and 2 must
        // resolve to index 1.
        let boxes = vec![
            boxed(1, 20.0, 10.0),
            boxed(2, 25.0, 20.0),
            boxed(3, 50.0, 10.0),
            boxed(4, 10.0, 10.0),
        ];
        assert_eq!(largest_box(&boxes).unwrap().id, 2);
    }
}
