//! Terminal runtime: an event loop with a single tick deadline, and a stack of
//! screens sharing one piece of application state.

pub use self::{
    event_loop::RenderMode,
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod event_loop;
mod runtime;
mod screen;
