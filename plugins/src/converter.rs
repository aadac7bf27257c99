use async_trait::async_trait;

use geoset_common::action::Action;
use geoset_core::Container;

/// Reads some source and adds it to, or removes it from, the container.
#[async_trait]
pub trait InputConverter: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn action(&self) -> Action;

    fn description(&self) -> &'static str;

    async fn input(&self, container: &Container) -> anyhow::Result<()>;
}

/// Writes the container (or part of it) in some target format.
#[async_trait]
pub trait OutputConverter: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    async fn output(&self, container: &Container) -> anyhow::Result<()>;
}
