//! The subblock record model: dimensions, coordinates and tile geometry.

use std::fmt;

use crate::query::{Attribute, EvaluationData};

/// A dimension of the container's multi-dimensional coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Z-direction (focus position)
    Z,
    /// Channel
    C,
    /// Time point
    T,
    /// Rotation
    R,
    /// Scene
    S,
    /// Illumination direction
    I,
    /// Acquisition tile
    H,
    /// View (for multi-view acquisition)
    V,
    /// Block (deprecated in the container format, but still addressable)
    B,
}

impl Dimension {
    /// Number of dimensions in the alphabet.
    pub const COUNT: usize = 9;

    /// All dimensions, in a fixed order.
    pub const ALL: [Dimension; Dimension::COUNT] = [
        Dimension::Z,
        Dimension::C,
        Dimension::T,
        Dimension::R,
        Dimension::S,
        Dimension::I,
        Dimension::H,
        Dimension::V,
        Dimension::B,
    ];

    /// Map a single-character dimension identifier to its dimension.
    pub fn from_char(c: char) -> Option<Dimension> {
        match c {
            'Z' => Some(Dimension::Z),
            'C' => Some(Dimension::C),
            'T' => Some(Dimension::T),
            'R' => Some(Dimension::R),
            'S' => Some(Dimension::S),
            'I' => Some(Dimension::I),
            'H' => Some(Dimension::H),
            'V' => Some(Dimension::V),
            'B' => Some(Dimension::B),
            _ => None,
        }
    }

    /// The single-character identifier of this dimension.
    pub fn to_char(self) -> char {
        match self {
            Dimension::Z => 'Z',
            Dimension::C => 'C',
            Dimension::T => 'T',
            Dimension::R => 'R',
            Dimension::S => 'S',
            Dimension::I => 'I',
            Dimension::H => 'H',
            Dimension::V => 'V',
            Dimension::B => 'B',
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A coordinate: for each dimension, optionally a position on that axis.
///
/// A subblock does not have to carry a position for every dimension; a query
/// referencing an absent dimension is resolved by the
/// [`NonExistentDimensionHandling`](crate::NonExistentDimensionHandling)
/// policy the query was compiled with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimCoordinate {
    values: [Option<i32>; Dimension::COUNT],
}

impl DimCoordinate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the position for the given dimension.
    pub fn set(&mut self, dimension: Dimension, value: i32) {
        self.values[dimension as usize] = Some(value);
    }

    /// The position for the given dimension, if the coordinate has one.
    pub fn get(&self, dimension: Dimension) -> Option<i32> {
        self.values[dimension as usize]
    }
}

impl FromIterator<(Dimension, i32)> for DimCoordinate {
    fn from_iter<T: IntoIterator<Item = (Dimension, i32)>>(iter: T) -> Self {
        let mut coordinate = DimCoordinate::new();
        for (dimension, value) in iter {
            coordinate.set(dimension, value);
        }
        coordinate
    }
}

/// An integer rectangle (position and extent).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// An integer size (extent in pixels).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntSize {
    pub w: u32,
    pub h: u32,
}

/// Information about one subblock: its coordinate and its tile geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubBlockInfo {
    /// The coordinate of the subblock in the dimension space.
    pub coordinate: DimCoordinate,
    /// The rectangle where the subblock is located on the logical plane.
    pub logical_rect: IntRect,
    /// The physical size of the subblock's bitmap in pixels.
    pub physical_size: IntSize,
}

impl SubBlockInfo {
    /// Whether the subblock belongs to pyramid layer 0, i.e. is stored at
    /// full resolution (its physical size equals its logical extent).
    pub fn is_layer0(&self) -> bool {
        i64::from(self.logical_rect.w) == i64::from(self.physical_size.w)
            && i64::from(self.logical_rect.h) == i64::from(self.physical_size.h)
    }
}

impl EvaluationData for SubBlockInfo {
    fn coordinate(&self, dimension: Dimension) -> Option<i32> {
        self.coordinate.get(dimension)
    }

    fn attribute(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::PhysicalWidth => self.physical_size.w as i32,
            Attribute::PhysicalHeight => self.physical_size.h as i32,
            Attribute::LogicalPositionX => self.logical_rect.x,
            Attribute::LogicalPositionY => self.logical_rect.y,
            Attribute::LogicalPositionWidth => self.logical_rect.w,
            Attribute::LogicalPositionHeight => self.logical_rect.h,
            Attribute::IsLayer0 => self.is_layer0() as i32,
        }
    }
}

/// A source of subblock records, enumerated in storage order.
pub trait SubBlockRepository {
    /// Call `f` for every subblock with its index and info. Enumeration
    /// stops when `f` returns `false`.
    fn enumerate_sub_blocks(&self, f: &mut dyn FnMut(usize, &SubBlockInfo) -> bool);
}

impl SubBlockRepository for [SubBlockInfo] {
    fn enumerate_sub_blocks(&self, f: &mut dyn FnMut(usize, &SubBlockInfo) -> bool) {
        for (index, info) in self.iter().enumerate() {
            if !f(index, info) {
                break;
            }
        }
    }
}
