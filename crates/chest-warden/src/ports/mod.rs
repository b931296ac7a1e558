//! Port traits: the inbound API and the outbound host dependencies.

pub mod inbound;
pub mod outbound;

pub use inbound::{AdminQueryApi, ContainerGuardApi};
pub use outbound::{
    Actor, ClientSync, Messenger, PlayerDirectory, SaveDataHost, SystemTimeSource, TimeSource,
    WorldView,
};
