use std::rc::Rc;

use cgmath::Point3;
use structure_viewer::engine_state::{
    resources::{AssetBundle, RegisteredResources, ResourceProvider},
    voxels::{
        region::RegionList,
        structure::PlacementError,
        structure_builder::StructureBuilder,
        voxel_map::RegionFillEngine,
    },
};

const HOUSE: &str = r#"{
    "width": 5,
    "height": 4,
    "depth": 5,
    "blocks": [
        { "start": [0, 0, 0], "end": [5, 1, 5], "type": "stone", "fill": true },
        { "start": [0, 1, 0], "end": [5, 4, 5], "type": "oak_planks" },
        { "start": [2, 1, 0], "end": [3, 3, 1], "type": "oak_door",
          "properties": { "half": "lower", "facing": "south" } },
        { "start": [4, 0, 4], "end": [5, 1, 5], "blockType": "glowstone", "fill": true }
    ]
}"#;

const ASSETS: &str = r#"{
    "blockstates": {
        "stone": { "variants": { "": { "model": "block/stone" } } },
        "oak_planks": { "variants": { "": { "model": "block/oak_planks" } } },
        "oak_door": { "variants": {
            "facing=south,half=lower": { "model": "block/oak_door_bottom" },
            "facing=south,half=upper": { "model": "block/oak_door_top" }
        } }
    },
    "models": {
        "block/cube_all": { "textures": {} },
        "block/stone": { "parent": "block/cube_all", "textures": { "all": "block/stone" } }
    },
    "textures": {
        "block/stone": [0, 0, 16, 16]
    }
}"#;

fn shell_voxels(size: i32) -> usize {
    let size = size as usize;
    size * size * size - (size - 2).pow(3)
}

#[test]
fn regions_fill_into_the_expected_voxels() {
    let regions = RegionList::from_json_str(HOUSE).unwrap();
    let voxels = RegionFillEngine::fill(&regions.blocks);

    // Floor 25, hollow walls 5x3x5 minus the 3x1x3 interior; door and glowstone overwrite.
    let walls = 5 * 3 * 5 - 3 * 1 * 3;
    assert_eq!(voxels.len(), 25 + walls);

    let door = voxels.get(Point3::new(2, 1, 0)).unwrap();
    assert_eq!(door.block_type, "oak_door");
    assert_eq!(
        door.properties.as_ref().and_then(|p| p.get("half")).map(String::as_str),
        Some("lower")
    );
    assert_eq!(
        voxels.get(Point3::new(4, 0, 4)).unwrap().block_type,
        "glowstone"
    );
    assert!(voxels.get(Point3::new(2, 2, 2)).is_none());
}

#[test]
fn builds_without_validation_when_no_assets_are_given() {
    let regions = RegionList::from_json_str(HOUSE).unwrap();

    let (structure, report) = StructureBuilder::build_from_regions(&regions, None);

    assert!(report.failures.is_empty());
    assert_eq!(structure.block_count(), report.placed);
    assert_eq!(
        structure.get_block(Point3::new(0, 0, 0)).unwrap().block_type,
        "minecraft:stone"
    );
}

#[test]
fn unknown_block_types_are_skipped_and_reported() {
    let regions = RegionList::from_json_str(HOUSE).unwrap();
    let bundle = AssetBundle::from_json_str(ASSETS).unwrap();
    let resources: Rc<dyn ResourceProvider> =
        Rc::new(RegisteredResources::from_bundle(bundle).unwrap());

    let (structure, report) = StructureBuilder::build_from_regions(&regions, Some(resources));

    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.position, Point3::new(4, 0, 4));
    assert!(matches!(failure.error, PlacementError::UnknownBlockType(_)));

    assert!(structure.get_block(Point3::new(4, 0, 4)).is_none());
    assert_eq!(
        structure.get_block(Point3::new(2, 2, 0)).unwrap().block_type,
        "minecraft:oak_door"
    );
    assert_eq!(structure.block_count(), report.placed);
}

#[test]
fn hollow_cube_keeps_only_its_shell() {
    let json = r#"{
        "width": 3, "height": 3, "depth": 3,
        "blocks": [ { "start": [0, 0, 0], "end": [3, 3, 3], "type": "glass" } ]
    }"#;
    let regions = RegionList::from_json_str(json).unwrap();

    let (structure, report) = StructureBuilder::build_from_regions(&regions, None);

    assert_eq!(report.placed, shell_voxels(3));
    assert!(structure.get_block(Point3::new(1, 1, 1)).is_none());
}
