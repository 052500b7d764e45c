pub mod text;
pub mod view_tree;

pub use view_tree::{
    CategoryView, EndpointDetails, EndpointId, EndpointView, ExpansionState, Renderer, ViewTree,
};
