// File: crates/heatmap-core/src/grid.rs
// Summary: Grid-to-canvas mapping: places each cell of a rows x columns matrix in container pixels.

use crate::error::{HeatMapError, Result};
use crate::types::{Point, ValueRange};
use crate::value::GridValue;

/// How the automatic value range is seeded before scanning the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RangeSeed {
    /// `min = +inf`, `max = 0`. An all-negative grid reports `max == 0`.
    #[default]
    ZeroMax,
    /// `min = +inf`, `max = -inf`.
    Exact,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridMap {
    /// Column-major, same order as the input values.
    pub points: Vec<Point>,
    pub range: ValueRange,
}

/// Check that `rows * columns` cells were supplied.
pub fn check_shape(len: usize, rows: usize, columns: usize) -> Result<()> {
    if rows == 0 || columns == 0 || rows.checked_mul(columns) != Some(len) {
        return Err(HeatMapError::InvalidGridShape { len, rows, columns });
    }
    Ok(())
}

/// Map `values` (column-major) onto a `width x height` container.
///
/// Points are inset by one step from every edge: `step_x = width / (columns + 1)`,
/// `step_y = height / (rows + 1)`, `x = floor(column * step_x)`, `y = floor(row * step_y)`.
/// When `fixed_range` is given it is returned as-is, otherwise the range is
/// scanned from the values using [`RangeSeed::ZeroMax`].
pub fn map_grid(
    values: &[GridValue],
    rows: usize,
    columns: usize,
    width: u32,
    height: u32,
    fixed_range: Option<ValueRange>,
) -> Result<GridMap> {
    map_grid_seeded(values, rows, columns, width, height, fixed_range, RangeSeed::default())
}

pub fn map_grid_seeded(
    values: &[GridValue],
    rows: usize,
    columns: usize,
    width: u32,
    height: u32,
    fixed_range: Option<ValueRange>,
    seed: RangeSeed,
) -> Result<GridMap> {
    check_shape(values.len(), rows, columns)?;

    let step_x = width as f64 / (columns as f64 + 1.0);
    let step_y = height as f64 / (rows as f64 + 1.0);

    let mut min = f64::INFINITY;
    let mut max = match seed {
        RangeSeed::ZeroMax => 0.0,
        RangeSeed::Exact => f64::NEG_INFINITY,
    };

    let mut points = Vec::with_capacity(values.len());
    for column in 1..=columns {
        for row in 1..=rows {
            let cell = &values[(column - 1) * rows + (row - 1)];
            let value = cell.value();
            if fixed_range.is_none() {
                min = min.min(value);
                max = max.max(value);
            }
            points.push(Point {
                x: (column as f64 * step_x).floor() as f32,
                y: (row as f64 * step_y).floor() as f32,
                value,
                label: cell.label().map(str::to_owned),
            });
        }
    }

    let range = fixed_range.unwrap_or(ValueRange { min, max });
    Ok(GridMap { points, range })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_numbers;

    #[test]
    fn two_by_two_in_thirty_pixels() {
        let values = from_numbers(&[1.0, 2.0, 3.0, 4.0]);
        let map = map_grid(&values, 2, 2, 30, 30, None).unwrap();
        assert_eq!(map.points.len(), 4);
        let first = &map.points[0];
        assert_eq!((first.x, first.y, first.value), (10.0, 10.0, 1.0));
        // column 1, row 2
        assert_eq!((map.points[1].x, map.points[1].y), (10.0, 20.0));
        let last = &map.points[3];
        assert_eq!((last.x, last.y, last.value), (20.0, 20.0, 4.0));
        assert_eq!(map.range, ValueRange::new(1.0, 4.0));
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let values = from_numbers(&[1.0, 2.0, 3.0]);
        let err = map_grid(&values, 2, 2, 30, 30, None).unwrap_err();
        assert_eq!(err, HeatMapError::InvalidGridShape { len: 3, rows: 2, columns: 2 });
        assert!(map_grid(&[], 0, 3, 30, 30, None).is_err());
    }

    #[test]
    fn column_major_order_and_labels() {
        // 3 rows x 2 columns
        let values = vec![
            GridValue::tagged("a", 1.0),
            GridValue::Number(2.0),
            GridValue::Number(3.0),
            GridValue::tagged("d", 4.0),
            GridValue::Number(5.0),
            GridValue::Number(6.0),
        ];
        let map = map_grid(&values, 3, 2, 300, 400, None).unwrap();
        let xs: Vec<f32> = map.points.iter().map(|p| p.x).collect();
        let ys: Vec<f32> = map.points.iter().map(|p| p.y).collect();
        assert_eq!(xs, vec![100.0, 100.0, 100.0, 200.0, 200.0, 200.0]);
        assert_eq!(ys, vec![100.0, 200.0, 300.0, 100.0, 200.0, 300.0]);
        assert_eq!(map.points[0].label.as_deref(), Some("a"));
        assert_eq!(map.points[3].label.as_deref(), Some("d"));
        assert_eq!(map.points[4].label, None);
    }

    #[test]
    fn positions_are_floored() {
        let values = from_numbers(&[0.0; 2]);
        let map = map_grid(&values, 1, 2, 100, 10, None).unwrap();
        // step_x = 33.33.., step_y = 5
        assert_eq!(map.points[0].x, 33.0);
        assert_eq!(map.points[1].x, 66.0);
        assert_eq!(map.points[0].y, 5.0);
    }

    #[test]
    fn fixed_range_is_used_unconditionally() {
        let values = from_numbers(&[-5.0, 50.0]);
        let fixed = ValueRange::new(0.0, 10.0);
        let map = map_grid(&values, 1, 2, 90, 90, Some(fixed)).unwrap();
        assert_eq!(map.range, fixed);
        assert_eq!(map.points[0].value, -5.0);
        assert_eq!(map.points[1].value, 50.0);
    }

    #[test]
    fn all_negative_grid_keeps_zero_max_unless_exact() {
        let values = from_numbers(&[-3.0, -1.0, -2.0, -7.0]);
        let legacy = map_grid(&values, 2, 2, 30, 30, None).unwrap();
        assert_eq!(legacy.range, ValueRange::new(-7.0, 0.0));

        let exact = map_grid_seeded(&values, 2, 2, 30, 30, None, RangeSeed::Exact).unwrap();
        assert_eq!(exact.range, ValueRange::new(-7.0, -1.0));
    }

    #[test]
    fn points_stay_inside_container_and_are_pure() {
        for &(rows, cols, w, h) in &[(1usize, 1usize, 1u32, 1u32), (7, 3, 640, 480), (16, 16, 33, 900)] {
            let values = from_numbers(&vec![1.5; rows * cols]);
            let a = map_grid(&values, rows, cols, w, h, None).unwrap();
            let b = map_grid(&values, rows, cols, w, h, None).unwrap();
            assert_eq!(a, b);
            assert_eq!(a.points.len(), rows * cols);
            for p in &a.points {
                assert!(p.x.is_finite() && p.y.is_finite());
                assert!(p.x >= 0.0 && p.x <= w as f32);
                assert!(p.y >= 0.0 && p.y <= h as f32);
            }
        }
    }
}
