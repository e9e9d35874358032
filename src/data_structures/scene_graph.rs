//! Scene graph and hierarchical vegetation organization.
//!
//! Provides traits and structures for compiling a [`Cell`] hierarchy into a
//! drawable scene graph: group nodes mirror the cell nesting, billboard
//! nodes own one instance buffer with one instance per tree.

use log::{debug, warn};
use rand::{Rng, RngCore};
use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        cell::{Cell, Tree},
        instance::{TreeInstance, TreeInstanceRaw},
    },
    render::{DrawVegetation, Instanced},
};

pub trait SceneNode {
    fn add_child(&mut self, child: Box<dyn SceneNode>);

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>>;

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>>;

    /// Trees held by this node and all nodes below it.
    fn tree_count(&self) -> usize;

    /// Append trees to this node's own instance list, rolling fresh jitter.
    ///
    /// The new instances only reach the GPU on the next
    /// [`write_to_buffers`](Self::write_to_buffers).
    fn add_trees(&mut self, trees: &[Tree], rng: &mut dyn RngCore);

    fn write_to_buffers(&mut self, queue: &wgpu::Queue, device: &wgpu::Device);

    fn get_render(&self) -> Vec<Instanced<'_>>;

    /// Record draw calls for this subtree. The caller has already set the
    /// billboard pipeline on the pass.
    fn draw(
        &self,
        texture_bind_group: &wgpu::BindGroup,
        camera_bind_group: &wgpu::BindGroup,
        render_pass: &mut wgpu::RenderPass<'_>,
    );
}

/// Compile a cell hierarchy into a scene graph.
///
/// A cell with trees yields a [`BillboardNode`]; a cell with children yields
/// a [`GroupNode`] with the recursively built children in cell order and the
/// local billboard node, if any, appended last. A cell with neither yields
/// `None`, and such gaps are skipped rather than kept as placeholders.
pub fn build_vegetation_node(
    cell: &Cell,
    device: &wgpu::Device,
    rng: &mut impl Rng,
) -> Option<Box<dyn SceneNode>> {
    let needs_group = !cell.cells.is_empty();
    let needs_trees = !cell.trees.is_empty();

    let billboards = if needs_trees {
        debug!("packing {} trees into a billboard node", cell.trees.len());
        Some(BillboardNode::from_trees(device, &cell.trees, rng))
    } else {
        None
    };

    if needs_group {
        let mut group = GroupNode::new();
        for child in &cell.cells {
            if let Some(node) = build_vegetation_node(child, device, rng) {
                group.add_child(node);
            }
        }
        if let Some(billboards) = billboards {
            group.add_child(Box::new(billboards));
        }
        Some(Box::new(group))
    } else {
        billboards.map(|node| Box::new(node) as Box<dyn SceneNode>)
    }
}

/// A node with children and no drawable of its own.
pub struct GroupNode {
    pub children: Vec<Box<dyn SceneNode>>,
}

impl GroupNode {
    pub fn new() -> Self {
        Self { children: vec![] }
    }
}

impl Default for GroupNode {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneNode for GroupNode {
    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn tree_count(&self) -> usize {
        self.children.iter().map(|child| child.tree_count()).sum()
    }

    fn add_trees(&mut self, trees: &[Tree], _: &mut dyn RngCore) {
        warn!(
            "You tried to add {} trees to a group node, which holds no instances. Add them to a billboard child instead.",
            trees.len()
        );
    }

    fn write_to_buffers(&mut self, queue: &wgpu::Queue, device: &wgpu::Device) {
        self.children
            .iter_mut()
            .for_each(|child| child.write_to_buffers(queue, device));
    }

    fn get_render(&self) -> Vec<Instanced<'_>> {
        self.children
            .iter()
            .flat_map(|child| child.get_render())
            .collect()
    }

    fn draw(
        &self,
        texture_bind_group: &wgpu::BindGroup,
        camera_bind_group: &wgpu::BindGroup,
        render_pass: &mut wgpu::RenderPass<'_>,
    ) {
        for child in &self.children {
            child.draw(texture_bind_group, camera_bind_group, render_pass);
        }
    }
}

/// A drawable leaf: one instance per tree, expanded to crossed quads by the
/// billboard shader.
pub struct BillboardNode {
    children: Vec<Box<dyn SceneNode>>,
    instances: Vec<TreeInstance>,
    instance_buffer: wgpu::Buffer,
    buffer_size_needs_change: bool,
}

impl BillboardNode {
    pub fn from_trees(device: &wgpu::Device, trees: &[Tree], rng: &mut impl Rng) -> Self {
        let instances: Vec<TreeInstance> = trees
            .iter()
            .map(|tree| TreeInstance::jittered(tree, rng))
            .collect();

        let instance_data = instances
            .iter()
            .map(TreeInstance::to_raw)
            .collect::<Vec<_>>();

        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Tree Instance Buffer"),
            contents: bytemuck::cast_slice(&instance_data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            children: vec![],
            instances,
            instance_buffer,
            buffer_size_needs_change: false,
        }
    }

    pub fn instances(&self) -> &[TreeInstance] {
        &self.instances
    }
}

impl SceneNode for BillboardNode {
    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn tree_count(&self) -> usize {
        self.instances.len()
            + self
                .children
                .iter()
                .map(|child| child.tree_count())
                .sum::<usize>()
    }

    fn add_trees(&mut self, trees: &[Tree], rng: &mut dyn RngCore) {
        self.instances
            .extend(trees.iter().map(|tree| TreeInstance::jittered(tree, rng)));
        self.buffer_size_needs_change = true;
    }

    fn write_to_buffers(&mut self, queue: &wgpu::Queue, device: &wgpu::Device) {
        let raw_instances: Vec<TreeInstanceRaw> =
            self.instances.iter().map(TreeInstance::to_raw).collect();
        if self.buffer_size_needs_change {
            self.instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Tree Instance Buffer"),
                contents: bytemuck::cast_slice(&raw_instances),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
            self.buffer_size_needs_change = false;
        } else {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&raw_instances),
            );
        }
        self.get_children_mut()
            .iter_mut()
            .for_each(|child| child.write_to_buffers(queue, device));
    }

    fn get_render(&self) -> Vec<Instanced<'_>> {
        self.children
            .iter()
            .flat_map(|child| child.get_render())
            .chain([Instanced {
                instance: &self.instance_buffer,
                amount: self.instances.len(),
            }])
            .collect()
    }

    fn draw(
        &self,
        texture_bind_group: &wgpu::BindGroup,
        camera_bind_group: &wgpu::BindGroup,
        render_pass: &mut wgpu::RenderPass<'_>,
    ) {
        if !self.instances.is_empty() {
            render_pass.draw_billboards(
                &Instanced {
                    instance: &self.instance_buffer,
                    amount: self.instances.len(),
                },
                texture_bind_group,
                camera_bind_group,
            );
        }
        for child in &self.children {
            child.draw(texture_bind_group, camera_bind_group, render_pass);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubNode(usize);

    impl SceneNode for StubNode {
        fn add_child(&mut self, _: Box<dyn SceneNode>) {}

        fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
            unimplemented!("stub has no children")
        }

        fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
            unimplemented!("stub has no children")
        }

        fn tree_count(&self) -> usize {
            self.0
        }

        fn add_trees(&mut self, trees: &[Tree], _: &mut dyn RngCore) {
            self.0 += trees.len();
        }

        fn write_to_buffers(&mut self, _: &wgpu::Queue, _: &wgpu::Device) {}

        fn get_render(&self) -> Vec<Instanced<'_>> {
            vec![]
        }

        fn draw(&self, _: &wgpu::BindGroup, _: &wgpu::BindGroup, _: &mut wgpu::RenderPass<'_>) {}
    }

    #[test]
    fn group_node_aggregates_tree_counts() {
        let mut group = GroupNode::new();
        group.add_child(Box::new(StubNode(3)));
        group.add_child(Box::new(StubNode(0)));

        let mut inner = GroupNode::new();
        inner.add_child(Box::new(StubNode(4)));
        group.add_child(Box::new(inner));

        assert_eq!(group.tree_count(), 7);
        assert_eq!(group.get_children().len(), 3);
    }

    #[test]
    fn group_node_refuses_trees() {
        let mut group = GroupNode::new();
        let mut rng = rand::rng();
        group.add_trees(
            &[Tree::new(cgmath::Vector3::new(0.0, 0.0, 0.0), 1.0, 1.0, 0)],
            &mut rng,
        );
        assert_eq!(group.tree_count(), 0);
    }
}
