use catalog_framework::{ActorEntity, FrameworkError, ResourceActor, UniqueKey};
use async_trait::async_trait;
use std::cmp::Ordering;
use uuid::Uuid;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Shelf {
    id: Uuid,
    room: String,
    label: String,
    locked: bool,
    visits: u32,
}

#[derive(Debug)]
struct ShelfCreate {
    room: String,
    label: String,
}

#[derive(Debug, Default)]
struct ShelfUpdate {
    label: Option<String>,
    locked: Option<bool>,
}

#[derive(Debug, Default)]
struct ShelfFilter {
    room: Option<String>,
}

#[derive(Debug)]
struct ShelfRemoval {
    force: bool,
}

#[derive(Debug)]
enum ShelfAction {
    Visit,
}

#[derive(Debug, thiserror::Error)]
enum ShelfError {
    #[error("Label is required")]
    MissingLabel,
    #[error("Shelf is locked")]
    Locked,
}

#[async_trait]
impl ActorEntity for Shelf {
    type Id = Uuid;
    type Create = ShelfCreate;
    type Update = ShelfUpdate;
    type Remove = ShelfRemoval;
    type Filter = ShelfFilter;
    type Action = ShelfAction;
    type ActionResult = u32;
    type Context = ();
    type Error = ShelfError;

    fn from_create_params(id: Uuid, params: ShelfCreate) -> Result<Self, Self::Error> {
        if params.label.trim().is_empty() {
            return Err(ShelfError::MissingLabel);
        }
        Ok(Self {
            id,
            room: params.room,
            label: params.label,
            locked: false,
            visits: 0,
        })
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("label_room", [self.label.as_str(), self.room.as_str()])]
    }

    fn matches(&self, filter: &ShelfFilter) -> bool {
        match &filter.room {
            Some(room) => *room == self.room,
            None => true,
        }
    }

    fn list_order(&self, other: &Self) -> Ordering {
        self.label.cmp(&other.label)
    }

    async fn on_update(
        &mut self,
        update: ShelfUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(label) = update.label {
            self.label = label;
        }
        if let Some(locked) = update.locked {
            self.locked = locked;
        }
        Ok(())
    }

    async fn on_delete(
        &self,
        remove: &ShelfRemoval,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if self.locked && !remove.force {
            return Err(ShelfError::Locked);
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ShelfAction,
        _ctx: &Self::Context,
    ) -> Result<u32, Self::Error> {
        match action {
            ShelfAction::Visit => {
                self.visits += 1;
                Ok(self.visits)
            }
        }
    }
}

fn shelf(room: &str, label: &str) -> ShelfCreate {
    ShelfCreate {
        room: room.to_string(),
        label: label.to_string(),
    }
}

fn entity_error(err: FrameworkError) -> ShelfError {
    match err {
        FrameworkError::EntityError(inner) => match inner.downcast::<ShelfError>() {
            Ok(e) => *e,
            Err(other) => panic!("unexpected entity error: {other}"),
        },
        other => panic!("expected entity error, got {other:?}"),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    // 1. Create returns the stored document
    let created = client.create(shelf("A", "Physics")).await.unwrap();
    assert_eq!(created.label, "Physics");
    assert_eq!(created.visits, 0);

    // 2. Actions mutate in place
    let visits = client
        .perform_action(created.id, ShelfAction::Visit)
        .await
        .unwrap();
    assert_eq!(visits, 1);
    let visits = client
        .perform_action(created.id, ShelfAction::Visit)
        .await
        .unwrap();
    assert_eq!(visits, 2);

    // 3. Update
    let updated = client
        .update(
            created.id,
            ShelfUpdate {
                label: Some("Chemistry".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.label, "Chemistry");
    assert_eq!(updated.visits, 2);

    // 4. Delete
    client
        .delete(created.id, ShelfRemoval { force: false })
        .await
        .unwrap();
    assert!(client.get(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unique_index_rejects_duplicates() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    client.create(shelf("A", "Physics")).await.unwrap();

    let duplicate = client.create(shelf("A", "Physics")).await;
    assert!(matches!(
        duplicate,
        Err(FrameworkError::Conflict {
            index: "label_room",
            ..
        })
    ));

    // Same label in another room is a different key
    client.create(shelf("B", "Physics")).await.unwrap();

    let all = client.list(ShelfFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_update_conflict_leaves_document_untouched() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    client.create(shelf("A", "Physics")).await.unwrap();
    let maths = client.create(shelf("A", "Maths")).await.unwrap();

    // Updating a document to its own key is not a conflict
    client
        .update(
            maths.id,
            ShelfUpdate {
                label: Some("Maths".into()),
                locked: Some(true),
            },
        )
        .await
        .unwrap();

    let clash = client
        .update(
            maths.id,
            ShelfUpdate {
                label: Some("Physics".into()),
                locked: Some(false),
            },
        )
        .await;
    assert!(matches!(clash, Err(FrameworkError::Conflict { .. })));

    let stored = client.get(maths.id).await.unwrap().unwrap();
    assert_eq!(stored.label, "Maths");
    assert!(stored.locked);
}

#[tokio::test]
async fn test_renamed_and_deleted_keys_are_released() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    let first = client.create(shelf("A", "Physics")).await.unwrap();
    client
        .update(
            first.id,
            ShelfUpdate {
                label: Some("Biology".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // The old key is free again
    let second = client.create(shelf("A", "Physics")).await.unwrap();

    client
        .delete(second.id, ShelfRemoval { force: false })
        .await
        .unwrap();
    client.create(shelf("A", "Physics")).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_creates_admit_one() {
    let (actor, client) = ResourceActor::<Shelf>::new(32);
    tokio::spawn(actor.run(()));

    let attempts: Vec<_> = (0..16)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.create(shelf("A", "Physics")).await })
        })
        .collect();

    let mut succeeded = 0;
    for attempt in attempts {
        if attempt.await.unwrap().is_ok() {
            succeeded += 1;
        }
    }
    assert_eq!(succeeded, 1);
}

#[tokio::test]
async fn test_list_filters_and_sorts() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    client.create(shelf("A", "Zoology")).await.unwrap();
    client.create(shelf("B", "Geology")).await.unwrap();
    client.create(shelf("A", "Algebra")).await.unwrap();

    let room_a = client
        .list(ShelfFilter {
            room: Some("A".into()),
        })
        .await
        .unwrap();
    let labels: Vec<_> = room_a.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["Algebra", "Zoology"]);

    let all = client.list(ShelfFilter::default()).await.unwrap();
    let labels: Vec<_> = all.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["Algebra", "Geology", "Zoology"]);
}

#[tokio::test]
async fn test_get_many_skips_missing_ids() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    let a = client.create(shelf("A", "One")).await.unwrap();
    let b = client.create(shelf("A", "Two")).await.unwrap();

    let found = client
        .get_many(vec![b.id, Uuid::new_v4(), a.id])
        .await
        .unwrap();
    let ids: Vec<_> = found.iter().map(|s| s.id).collect();
    assert_eq!(ids, [b.id, a.id]);

    assert!(client.get_many(Vec::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_hook_errors_are_recoverable() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    let err = client.create(shelf("A", "  ")).await.unwrap_err();
    assert!(matches!(entity_error(err), ShelfError::MissingLabel));

    let locked = client.create(shelf("A", "Vault")).await.unwrap();
    client
        .update(
            locked.id,
            ShelfUpdate {
                locked: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let err = client
        .delete(locked.id, ShelfRemoval { force: false })
        .await
        .unwrap_err();
    assert!(matches!(entity_error(err), ShelfError::Locked));
    assert!(client.get(locked.id).await.unwrap().is_some());

    client
        .delete(locked.id, ShelfRemoval { force: true })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_missing_documents_report_not_found() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    let missing = Uuid::new_v4();
    assert!(client.get(missing).await.unwrap().is_none());
    assert!(matches!(
        client.update(missing, ShelfUpdate::default()).await,
        Err(FrameworkError::NotFound(_))
    ));
    assert!(matches!(
        client.delete(missing, ShelfRemoval { force: true }).await,
        Err(FrameworkError::NotFound(_))
    ));
    assert!(matches!(
        client.perform_action(missing, ShelfAction::Visit).await,
        Err(FrameworkError::NotFound(_))
    ));
}
