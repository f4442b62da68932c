// Load-time decoration: pads light up one after another in spiral order,
// outer ring clockwise first. Purely a function of elapsed time; never touches the grid.

use std::time::{Duration, Instant};

use crate::shared::{PadId, GRID_SIZE, NUM_PADS};

/// Layer-peeling spiral over a `rows` x `cols` matrix, as (row, col) pairs.
pub fn spiral_order(rows: usize, cols: usize) -> Vec<(usize, usize)> {
    let mut order = Vec::with_capacity(rows * cols);
    if rows == 0 || cols == 0 {
        return order;
    }
    let (mut top, mut bottom) = (0isize, rows as isize - 1);
    let (mut left, mut right) = (0isize, cols as isize - 1);

    while left <= right && top <= bottom {
        for c in left..=right {
            order.push((top as usize, c as usize));
        }
        top += 1;
        for r in top..=bottom {
            order.push((r as usize, right as usize));
        }
        right -= 1;
        if top <= bottom {
            for c in (left..=right).rev() {
                order.push((bottom as usize, c as usize));
            }
            bottom -= 1;
        }
        if left <= right {
            for r in (top..=bottom).rev() {
                order.push((r as usize, left as usize));
            }
            left += 1;
        }
    }
    order
}

#[derive(Clone, Debug)]
pub struct Spiral {
    start: Instant,
    step: Duration,
    hold: Duration,
    position: [usize; NUM_PADS], // pad index -> place in the sequence
}

impl Spiral {
    pub fn new(start: Instant, step: Duration, hold: Duration) -> Self {
        let mut position = [0; NUM_PADS];
        for (i, (row, col)) in spiral_order(GRID_SIZE, GRID_SIZE).into_iter().enumerate() {
            if let Some(pad) = PadId::new(row, col) {
                position[pad.index()] = i;
            }
        }
        Self { start, step, hold, position }
    }

    // lit during [start + i*step, start + i*step + hold)
    pub fn is_lit(&self, pad: PadId, now: Instant) -> bool {
        let on = self.start + self.step * self.position[pad.index()] as u32;
        now >= on && now < on + self.hold
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.start + self.step * (NUM_PADS as u32 - 1) + self.hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids(order: &[(usize, usize)]) -> Vec<String> {
        order.iter().map(|(r, c)| format!("{r}-{c}")).collect()
    }

    #[test]
    fn visits_every_cell_once() {
        let order = spiral_order(8, 8);
        assert_eq!(order.len(), 64);
        let unique: HashSet<_> = order.iter().collect();
        assert_eq!(unique.len(), 64);
    }

    #[test]
    fn starts_with_outer_ring_clockwise() {
        let order = ids(&spiral_order(8, 8));
        let top: Vec<String> = (0..8).map(|c| format!("0-{c}")).collect();
        assert_eq!(&order[0..8], top.as_slice());
        assert_eq!(order[8], "1-7");
        assert_eq!(order[14], "7-7"); // bottom-right corner
        assert_eq!(order[21], "7-0"); // bottom-left corner
        assert_eq!(order[27], "1-0"); // last of the outer ring
        assert_eq!(order[28], "1-1"); // next ring starts
        assert_eq!(order[63], "4-3"); // center
    }

    #[test]
    fn non_square_shapes_do_not_repeat() {
        for (rows, cols) in [(1, 5), (5, 1), (3, 4), (4, 3), (2, 7)] {
            let order = spiral_order(rows, cols);
            let unique: HashSet<_> = order.iter().collect();
            assert_eq!(order.len(), rows * cols);
            assert_eq!(unique.len(), rows * cols);
        }
        assert!(spiral_order(0, 4).is_empty());
    }

    #[test]
    fn pads_light_in_sequence() {
        let start = Instant::now();
        let step = Duration::from_millis(100);
        let spiral = Spiral::new(start, step, step * 2);
        let first = PadId::new(0, 0).unwrap();
        let ninth = PadId::new(1, 7).unwrap();

        assert!(spiral.is_lit(first, start));
        assert!(!spiral.is_lit(ninth, start));
        assert!(spiral.is_lit(ninth, start + step * 8));
        assert!(!spiral.is_lit(first, start + step * 2));
        assert!(!spiral.is_finished(start + step * 10));
        assert!(spiral.is_finished(start + step * 65));
    }
}
