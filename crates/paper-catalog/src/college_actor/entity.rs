//! [`ActorEntity`] implementation for [`College`].

use crate::error::CatalogError;
use crate::model::{College, CollegeCreate, CollegeId};
use async_trait::async_trait;
use catalog_framework::{ActorEntity, NoAction, UniqueKey};
use std::cmp::Ordering;

#[async_trait]
impl ActorEntity for College {
    type Id = CollegeId;
    type Create = CollegeCreate;
    type Update = CollegeCreate;
    type Remove = ();
    type Filter = ();
    type Action = NoAction;
    type ActionResult = ();
    type Context = ();
    type Error = CatalogError;

    fn from_create_params(id: CollegeId, params: CollegeCreate) -> Result<Self, Self::Error> {
        Ok(College::new(id, params))
    }

    /// Name and code are unique on their own.
    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![
            UniqueKey::new("name", [&self.name]),
            UniqueKey::new("code", [&self.code]),
        ]
    }

    fn list_order(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }

    async fn on_update(&mut self, update: CollegeCreate, _ctx: &()) -> Result<(), Self::Error> {
        self.name = update.name;
        self.code = update.code;
        self.location = update.location;
        Ok(())
    }

    async fn handle_action(&mut self, action: NoAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
