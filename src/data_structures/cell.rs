//! Spatial cells and per-tree placement data.
//!
//! A [`Cell`] is the input to the scene-graph builder: a bag of trees plus
//! any number of child cells. How the hierarchy was partitioned is up to the
//! caller (terrain paging, quadtrees, hand-placed groves); this crate only
//! walks it.

use cgmath::Vector3;

/// A single tree placement.
///
/// `layer` selects the slice of the billboard texture array the tree is
/// textured from. `width` is the half-extent of each billboard quad, so a
/// tree covers `2 * width` across and `height` up.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    pub position: Vector3<f32>,
    pub height: f32,
    pub width: f32,
    pub layer: u32,
}

impl Tree {
    pub fn new(position: Vector3<f32>, height: f32, width: f32, layer: u32) -> Self {
        Self {
            position,
            height,
            width,
            layer,
        }
    }
}

/// Axis-aligned bounds of a set of trees, crown included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl BoundingBox {
    fn from_tree(tree: &Tree) -> Self {
        let mut bb = Self {
            min: tree.position,
            max: tree.position,
        };
        bb.expand_by_tree(tree);
        bb
    }

    /// Grow the box to enclose the tree's full crossed-quad footprint.
    pub fn expand_by_tree(&mut self, tree: &Tree) {
        let low = tree.position - Vector3::new(tree.width, 0.0, tree.width);
        let high = tree.position + Vector3::new(tree.width, tree.height, tree.width);
        self.min.x = self.min.x.min(low.x);
        self.min.y = self.min.y.min(low.y);
        self.min.z = self.min.z.min(low.z);
        self.max.x = self.max.x.max(high.x);
        self.max.y = self.max.y.max(high.y);
        self.max.z = self.max.z.max(high.z);
    }

    pub fn union(&mut self, other: &BoundingBox) {
        self.min.x = self.min.x.min(other.min.x);
        self.min.y = self.min.y.min(other.min.y);
        self.min.z = self.min.z.min(other.min.z);
        self.max.x = self.max.x.max(other.max.x);
        self.max.y = self.max.y.max(other.max.y);
        self.max.z = self.max.z.max(other.max.z);
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) / 2.0
    }
}

/// A node in the spatial hierarchy: local trees plus child cells.
#[derive(Clone, Debug, Default)]
pub struct Cell {
    pub trees: Vec<Tree>,
    pub cells: Vec<Cell>,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Number of trees in this cell and all child cells.
    pub fn tree_count(&self) -> usize {
        self.trees.len() + self.cells.iter().map(Cell::tree_count).sum::<usize>()
    }

    /// Bounds over the whole subtree, or `None` when it holds no trees.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let mut bounds: Option<BoundingBox> = None;
        for tree in &self.trees {
            match &mut bounds {
                Some(bb) => bb.expand_by_tree(tree),
                None => bounds = Some(BoundingBox::from_tree(tree)),
            }
        }
        for cell in &self.cells {
            if let Some(child_bounds) = cell.bounds() {
                match &mut bounds {
                    Some(bb) => bb.union(&child_bounds),
                    None => bounds = Some(child_bounds),
                }
            }
        }
        bounds
    }
}
