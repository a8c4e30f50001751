//! # Block Models
//!
//! Block models inherit from a parent model. After a bundle is loaded every model is
//! flattened so lookups never need to walk the parent chain again.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::warn;
use serde::Deserialize;
use serde_json::Value;

use crate::engine_state::voxels::block::block_id::namespaced;

/// A block model as stored in the asset bundle.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BlockModel {
    /// Identifier of the parent model, if any
    #[serde(default)]
    pub parent: Option<String>,
    /// Texture variable bindings, e.g. `"all": "block/stone"`
    #[serde(default)]
    pub textures: BTreeMap<String, String>,
    /// Cuboid elements, kept opaque for the renderer
    #[serde(default)]
    pub elements: Option<Vec<Value>>,
}

/// Resolves every model's parent chain in place.
///
/// Textures merge from the root of the chain down, so a child binding overrides its
/// parent's. Elements come from the nearest model in the chain that defines any.
/// A missing parent or a cycle ends the chain where it is detected.
pub fn flatten_models(models: &mut HashMap<String, BlockModel>) {
    let mut flattened = Vec::with_capacity(models.len());

    for id in models.keys() {
        let chain = parent_chain(models, id);

        let mut textures = BTreeMap::new();
        for ancestor in chain.iter().rev() {
            textures.extend(ancestor.textures.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        let elements = chain.iter().find_map(|model| model.elements.clone());

        flattened.push((id.clone(), textures, elements));
    }

    for (id, textures, elements) in flattened {
        if let Some(model) = models.get_mut(&id) {
            model.textures = textures;
            model.elements = elements;
        }
    }
}

/// Collects the model and its ancestors, nearest first.
fn parent_chain<'a>(models: &'a HashMap<String, BlockModel>, id: &str) -> Vec<&'a BlockModel> {
    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    let mut current = Some(id.to_string());

    while let Some(current_id) = current.take() {
        if !visited.insert(current_id.clone()) {
            warn!("Block model {id} has a cyclic parent chain at {current_id}");
            break;
        }
        let Some(model) = models.get(&current_id) else {
            if current_id != id {
                warn!("Block model {id} references missing parent {current_id}");
            }
            break;
        };
        chain.push(model);
        current = model.parent.as_deref().map(|parent| namespaced(parent).into_owned());
    }

    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(parent: Option<&str>, textures: &[(&str, &str)], elements: Option<Value>) -> BlockModel {
        BlockModel {
            parent: parent.map(str::to_string),
            textures: textures
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            elements: elements.map(|e| vec![e]),
        }
    }

    #[test]
    fn children_inherit_and_override_parent_data() {
        let mut models = HashMap::new();
        models.insert(
            "minecraft:block/cube".to_string(),
            model(None, &[("particle", "#down")], Some(json!({ "from": [0, 0, 0] }))),
        );
        models.insert(
            "minecraft:block/cube_all".to_string(),
            model(Some("block/cube"), &[("down", "#all"), ("particle", "#all")], None),
        );
        models.insert(
            "minecraft:block/stone".to_string(),
            model(Some("minecraft:block/cube_all"), &[("all", "block/stone")], None),
        );

        flatten_models(&mut models);

        let stone = &models["minecraft:block/stone"];
        assert_eq!(stone.textures["all"], "block/stone");
        assert_eq!(stone.textures["down"], "#all");
        assert_eq!(stone.textures["particle"], "#all");
        assert_eq!(stone.elements.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn cycles_and_missing_parents_do_not_hang() {
        let mut models = HashMap::new();
        models.insert("minecraft:a".to_string(), model(Some("b"), &[("x", "1")], None));
        models.insert("minecraft:b".to_string(), model(Some("a"), &[("y", "2")], None));
        models.insert("minecraft:c".to_string(), model(Some("gone"), &[("z", "3")], None));

        flatten_models(&mut models);

        assert_eq!(models["minecraft:a"].textures.len(), 2);
        assert_eq!(models["minecraft:c"].textures.len(), 1);
    }
}
