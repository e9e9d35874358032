#![cfg(feature = "integration-tests")]

mod common;

use grove_ngin::{
    camera::camera_bind_group_layout,
    data_structures::{
        cell::{Cell, Tree},
        scene_graph::build_vegetation_node,
        texture::Texture,
    },
    pipelines::billboard::mk_billboard_pipeline,
    render::VERTICES_PER_TREE,
    resources::billboard_bind_group,
};
use rand::{SeedableRng, rngs::StdRng};

fn tree(x: f32, z: f32) -> Tree {
    Tree::new(grove_ngin::Vector3::new(x, 0.0, z), 5.0, 1.5, 0)
}

fn cell_with_trees(count: usize) -> Cell {
    let mut cell = Cell::new();
    for i in 0..count {
        cell.add_tree(tree(i as f32 * 3.0, 0.0));
    }
    cell
}

#[test]
fn empty_cell_builds_no_node() {
    let (device, _queue) = common::test_device();
    let mut rng = StdRng::seed_from_u64(7);

    assert!(build_vegetation_node(&Cell::new(), &device, &mut rng).is_none());
}

#[test]
fn nested_empty_cells_build_an_empty_group() {
    let (device, _queue) = common::test_device();
    let mut rng = StdRng::seed_from_u64(7);

    let mut root = Cell::new();
    root.add_cell(Cell::new());

    // A cell with children still yields a group; only the empty children
    // themselves are skipped.
    let node = build_vegetation_node(&root, &device, &mut rng).expect("child cells yield a group");
    assert_eq!(node.get_children().len(), 0);
    assert_eq!(node.tree_count(), 0);
    assert!(node.get_render().is_empty());
}

#[test]
fn leaf_cell_builds_a_single_billboard_batch() {
    let (device, _queue) = common::test_device();
    let mut rng = StdRng::seed_from_u64(7);

    let node = build_vegetation_node(&cell_with_trees(4), &device, &mut rng)
        .expect("a cell with trees yields a node");

    assert_eq!(node.tree_count(), 4);
    let batches = node.get_render();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].amount, 4);
}

#[test]
fn nested_cells_order_children_before_the_local_billboards() {
    let (device, _queue) = common::test_device();
    let mut rng = StdRng::seed_from_u64(7);

    let mut root = cell_with_trees(3);
    root.add_cell(cell_with_trees(1));
    root.add_cell(Cell::new());
    root.add_cell(cell_with_trees(2));

    let node = build_vegetation_node(&root, &device, &mut rng).expect("root holds trees");

    assert_eq!(node.tree_count(), 6);
    // Empty child cells leave no placeholder behind.
    assert_eq!(node.get_children().len(), 3);

    let amounts: Vec<usize> = node.get_render().iter().map(|b| b.amount).collect();
    assert_eq!(amounts, vec![1, 2, 3]);
}

#[test]
fn added_trees_reach_the_buffer_after_a_write() {
    let (device, queue) = common::test_device();
    let mut rng = StdRng::seed_from_u64(7);

    let mut node = build_vegetation_node(&cell_with_trees(1), &device, &mut rng)
        .expect("a cell with trees yields a node");

    node.add_trees(&[tree(10.0, 0.0), tree(0.0, 10.0)], &mut rng);
    node.write_to_buffers(&queue, &device);

    let batches = node.get_render();
    assert_eq!(batches[0].amount, 3);
    // 32 bytes per raw instance.
    assert!(batches[0].instance.size() >= 3 * 32);
}

#[test]
fn billboard_pipeline_builds_against_an_srgb_target() {
    let (device, _queue) = common::test_device();

    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        width: 640,
        height: 480,
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode: wgpu::CompositeAlphaMode::Auto,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };

    let camera_layout = camera_bind_group_layout(&device);
    let pipeline = mk_billboard_pipeline(&device, &config, &camera_layout);
    drop(pipeline);

    assert_eq!(VERTICES_PER_TREE, 12);
}

#[test]
fn texture_array_accepts_uniform_layers_only() {
    let (device, queue) = common::test_device();

    let green = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        8,
        8,
        image::Rgba([20, 160, 40, 255]),
    ));
    let brown = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        8,
        8,
        image::Rgba([120, 90, 40, 255]),
    ));

    let texture = Texture::from_layers(&device, &queue, &[green.clone(), brown], "test array")
        .expect("uniform layers build an array");
    billboard_bind_group(&device, &texture).expect("array texture carries a sampler");

    let tall = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        8,
        16,
        image::Rgba([0, 0, 0, 255]),
    ));
    assert!(Texture::from_layers(&device, &queue, &[green, tall], "bad array").is_err());
}
