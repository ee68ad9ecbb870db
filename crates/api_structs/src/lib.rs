mod audit;
mod batch;
mod client;
mod queue;
mod schedule;
mod status;
mod template;

pub mod dtos {
    pub use crate::audit::dtos::*;
    pub use crate::client::dtos::*;
    pub use crate::queue::dtos::*;
    pub use crate::schedule::dtos::*;
    pub use crate::template::dtos::*;
}

pub use crate::audit::api::*;
pub use crate::batch::api::*;
pub use crate::client::api::*;
pub use crate::queue::api::*;
pub use crate::schedule::api::*;
pub use crate::status::api::*;
pub use crate::template::api::*;
