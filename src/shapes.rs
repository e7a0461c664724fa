//! Shape arrangement engine
//!
//! Six shape tags in a grid. Operations only permute the sequence, so the
//! length and the multiplicity of each tag never change.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::SHAPE_COUNT;
use crate::store::{SubscriptionId, Subscribers};

/// Shape drawn in a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Square,
    Circle,
    Ellipse,
    Trapezoid,
    Rectangle,
    Parallelogram,
}

impl ShapeKind {
    /// CSS class of the shape element
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Trapezoid => "trapezoid",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Parallelogram => "parallelogram",
        }
    }
}

/// Order every fresh page mount starts from
pub const INITIAL_SHAPES: [ShapeKind; SHAPE_COUNT] = [
    ShapeKind::Square,
    ShapeKind::Circle,
    ShapeKind::Ellipse,
    ShapeKind::Trapezoid,
    ShapeKind::Rectangle,
    ShapeKind::Parallelogram,
];

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// First shape moves to the end
    Left,
    /// Last shape moves to the front
    Right,
}

pub struct ShapeArrangement {
    shapes: [ShapeKind; SHAPE_COUNT],
    rng: Pcg32,
    subscribers: Subscribers<[ShapeKind; SHAPE_COUNT]>,
}

impl ShapeArrangement {
    /// Initial order, shuffle RNG seeded with `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            shapes: INITIAL_SHAPES,
            rng: Pcg32::seed_from_u64(seed),
            subscribers: Subscribers::default(),
        }
    }

    pub fn shapes(&self) -> &[ShapeKind] {
        &self.shapes
    }

    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&[ShapeKind; SHAPE_COUNT]) + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Single-step circular rotation
    pub fn rotate(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.shapes.rotate_left(1),
            Direction::Right => self.shapes.rotate_right(1),
        }
        self.changed();
    }

    /// Exchange positions 0-2 with 3-5 as blocks
    pub fn swap_halves(&mut self) {
        let (front, back) = self.shapes.split_at_mut(SHAPE_COUNT / 2);
        front.swap_with_slice(back);
        self.changed();
    }

    /// Random permutation (identity is possible)
    pub fn shuffle(&mut self) {
        self.shapes.shuffle(&mut self.rng);
        self.changed();
    }

    /// Back to the initial order
    pub fn reset(&mut self) {
        self.shapes = INITIAL_SHAPES;
        self.changed();
    }

    fn changed(&mut self) {
        log::debug!("Shapes: {:?}", self.shapes);
        self.subscribers.notify(&self.shapes);
    }
}
