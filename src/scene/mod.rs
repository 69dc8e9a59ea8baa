mod graph;
mod object;

pub use graph::{Group, SceneGraph, FIGURE_GROUP};
pub use object::{
    AnimationProfile, Attribute, Channel, Emphasis, HitVolume, LiveState, Material, ObjectId,
    SceneObject, SemanticRecord, Shape, Transform, Waveform,
};
