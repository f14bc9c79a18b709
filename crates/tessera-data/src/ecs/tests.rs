// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::{
    Archetype, Component, ComponentCollection, Entity, EntityId, StorageError, TagComponent,
};

// --- DUMMY COMPONENTS FOR TESTING ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Component)]
struct Position {
    x: f32,
    y: f32,
}

impl Position {
    fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Component)]
struct Velocity {
    dx: f32,
    dy: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Component)]
struct Name(String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, TagComponent)]
struct Player;

// --- COLLECTION ---

#[test]
fn test_new_collection_is_empty() {
    let collection = ComponentCollection::new();
    assert!(collection.is_empty());
    assert_eq!(collection.len(), 0);
}

#[test]
fn test_emplace_rejects_duplicates_and_keeps_original() {
    // --- 1. SETUP ---
    let mut collection = ComponentCollection::new();

    // --- 2. ACTION ---
    let first = collection.emplace(Position::new(1.0, 10.0));
    let second = collection.emplace(Position::new(100.0, 100.0));

    // --- 3. ASSERTIONS ---
    assert!(first, "The first emplace should succeed");
    assert!(!second, "A second component of the same type must be rejected");
    assert_eq!(collection.len(), 1);
    assert_eq!(
        collection.get::<Position>().read(|p| *p),
        Some(Position::new(1.0, 10.0)),
        "The original value should be untouched"
    );
}

#[test]
fn test_emplace_distinct_types() {
    let mut collection = ComponentCollection::new();
    assert!(collection.emplace(Position::new(0.0, 0.0)));
    assert!(collection.emplace(Velocity { dx: 1.0, dy: 0.0 }));
    assert!(collection.emplace_default::<Player>());
    assert!(!collection.emplace_default::<Player>());
    assert_eq!(collection.len(), 3);
}

#[test]
fn test_emplace_then_extract_round_trip() {
    // --- 1. SETUP ---
    let mut collection = ComponentCollection::new();
    collection.emplace(Name("ship".to_string()));
    collection.emplace(Position::new(3.0, 4.0));

    // --- 2. ACTION ---
    let extracted = collection
        .extract::<Position>()
        .expect("Position should be stored");

    // --- 3. ASSERTIONS ---
    assert_eq!(extracted.try_unwrap().ok(), Some(Position::new(3.0, 4.0)));
    assert_eq!(collection.len(), 1, "Size should drop by exactly one");
    assert!(!collection.has_all::<(Position,)>());
    assert!(collection.contains::<Name>());
}

#[test]
fn test_extract_missing_returns_none() {
    let mut collection = ComponentCollection::new();
    collection.emplace(Velocity::default());
    assert!(collection.extract::<Position>().is_none());
    assert_eq!(collection.len(), 1);
}

#[test]
fn test_extract_erased_keeps_concrete_type() {
    let mut collection = ComponentCollection::new();
    collection.emplace(Name("erased".to_string()));

    let erased = collection
        .extract_erased(std::any::TypeId::of::<Name>())
        .expect("Name should be stored");
    assert!(erased.component_name().ends_with("Name"));
    assert!(erased.is::<Name>());
    assert!(!erased.is::<Position>());

    let erased = erased
        .downcast::<Position>()
        .expect_err("A Name must not downcast to Position");
    let name = erased.downcast::<Name>().expect("Name should downcast");
    assert_eq!(name.read().0, "erased");
    assert!(collection.is_empty());
}

#[test]
fn test_erase_reports_removal() {
    let mut collection = ComponentCollection::new();
    collection.emplace(Position::new(1.0, 10.0));

    assert!(collection.erase::<Position>());
    assert!(collection.is_empty());
    assert!(!collection.erase::<Position>(), "Erasing twice should report false");
}

#[test]
fn test_erase_then_emplace_replaces() {
    let mut collection = ComponentCollection::new();
    collection.emplace(Position::new(1.0, 1.0));
    collection.erase::<Position>();
    assert!(collection.emplace(Position::new(2.0, 2.0)));
    assert_eq!(
        collection.get::<Position>().read(|p| *p),
        Some(Position::new(2.0, 2.0))
    );
}

#[test]
fn test_get_missing_is_empty_observer() {
    let collection = ComponentCollection::new();
    let observer = collection.get::<Position>();
    assert!(!observer.is_alive());
    assert!(observer.lock().is_none());
}

#[test]
fn test_get_allows_mutation_in_place() {
    let mut collection = ComponentCollection::new();
    collection.emplace(Position::new(0.0, 0.0));

    let observer = collection.get::<Position>();
    if let Some(position) = observer.lock() {
        position.write().x = 42.0;
    }

    let extracted = collection.extract::<Position>().and_then(|p| p.try_unwrap().ok());
    assert_eq!(extracted, Some(Position::new(42.0, 0.0)));
}

#[test]
fn test_observer_does_not_extend_lifetime() {
    // --- 1. SETUP ---
    let mut collection = ComponentCollection::new();
    collection.emplace(Position::new(1.0, 1.0));
    collection.emplace(Velocity::default());
    collection.emplace(Name("n".to_string()));
    let position = collection.get::<Position>();
    let velocity = collection.get::<Velocity>();
    let name = collection.get::<Name>();
    assert!(position.is_alive() && velocity.is_alive() && name.is_alive());

    // --- 2. ACTION & ASSERTIONS ---
    collection.erase::<Position>();
    assert!(!position.is_alive(), "Erase should invalidate the observer");
    assert!(position.read(|p| *p).is_none());

    let _ = collection.extract::<Velocity>();
    assert!(!velocity.is_alive(), "Extract should invalidate the observer");

    collection.clear();
    assert!(!name.is_alive(), "Clear should invalidate the observer");
    assert!(collection.is_empty());
}

#[test]
fn test_observer_dies_with_collection() {
    let observer = {
        let mut collection = ComponentCollection::new();
        collection.emplace(Position::default());
        collection.get::<Position>()
    };
    assert!(observer.lock().is_none());
}

#[test]
fn test_extract_shares_value_with_outstanding_ref() {
    // --- 1. SETUP ---
    let mut collection = ComponentCollection::new();
    collection.emplace(Position::new(5.0, 5.0));
    let observer = collection.get::<Position>();
    let held = observer.lock().expect("Position should be alive");

    // --- 2. ACTION ---
    let extracted = collection
        .extract::<Position>()
        .expect("Position should be stored");

    // --- 3. ASSERTIONS ---
    assert!(!collection.contains::<Position>());
    assert!(!observer.is_alive(), "Extract should invalidate the observer");
    assert!(held.ptr_eq(&extracted), "Both handles share one value");

    held.write().x = 6.0;
    assert_eq!(extracted.read().x, 6.0);

    let extracted = extracted
        .try_unwrap()
        .expect_err("The held reference still shares the value");
    drop(held);
    assert_eq!(extracted.try_unwrap().ok(), Some(Position::new(6.0, 5.0)));
}

#[test]
fn test_extract_while_write_guard_held() {
    // --- 1. SETUP ---
    let mut collection = ComponentCollection::new();
    collection.emplace(Position::new(1.0, 0.0));
    let held = collection
        .get::<Position>()
        .lock()
        .expect("Position should be alive");
    let mut guard = held.write();

    // --- 2. ACTION ---
    // Must return without waiting on the guard.
    let extracted = collection
        .extract::<Position>()
        .expect("Position should be stored");

    // --- 3. ASSERTIONS ---
    assert!(collection.is_empty());
    guard.x = 2.0;
    drop(guard);
    drop(held);
    assert_eq!(extracted.try_unwrap().ok(), Some(Position::new(2.0, 0.0)));
}

#[test]
fn test_has_all_and_has_any() {
    // --- 1. SETUP ---
    let mut collection = ComponentCollection::new();
    collection.emplace(Position::default());

    // --- 2. ASSERTIONS ---
    assert!(collection.has_all::<()>(), "An empty type list is always satisfied");
    assert!(!collection.has_any::<()>(), "An empty type list never matches");
    assert!(collection.has_any::<(Position, Velocity)>());
    assert!(!collection.has_all::<(Position, Velocity)>());
    assert!(collection.has_all::<(Position,)>());
    assert!(!collection.has_any::<(Velocity, Name, Player)>());

    let empty = ComponentCollection::new();
    assert!(empty.has_all::<()>());
    assert!(!empty.has_any::<(Position,)>());
}

#[test]
fn test_clone_is_deep() {
    // --- 1. SETUP ---
    let mut original = ComponentCollection::new();
    original.emplace(Position::new(1.0, 2.0));
    original.emplace(Name("original".to_string()));

    // --- 2. ACTION ---
    let copy = original.clone();
    copy.get::<Position>().write(|p| p.x = 99.0);
    copy.get::<Name>().write(|n| n.0.push_str("-copy"));

    // --- 3. ASSERTIONS ---
    assert_eq!(copy.len(), original.len());
    assert_eq!(
        original.get::<Position>().read(|p| *p),
        Some(Position::new(1.0, 2.0)),
        "Mutating the copy must not reach the original"
    );
    assert_eq!(
        original.get::<Name>().read(|n| n.0.clone()),
        Some("original".to_string())
    );
    assert_eq!(copy.get::<Position>().read(|p| p.x), Some(99.0));
}

#[test]
fn test_clone_from_replaces_contents() {
    let mut source = ComponentCollection::new();
    source.emplace(Velocity { dx: 1.0, dy: 1.0 });

    let mut destination = ComponentCollection::new();
    destination.emplace(Position::default());
    let stale = destination.get::<Position>();

    destination.clone_from(&source);

    assert!(!stale.is_alive(), "Existing components are released first");
    assert!(destination.has_all::<(Velocity,)>());
    assert!(!destination.contains::<Position>());
    assert_eq!(destination.len(), 1);
}

#[test]
fn test_try_clone_while_write_guard_held() {
    // --- 1. SETUP ---
    let mut collection = ComponentCollection::new();
    collection.emplace(Position::new(1.0, 0.0));
    collection.emplace(Name("kept".to_string()));
    let held = collection
        .get::<Position>()
        .lock()
        .expect("Position should be alive");
    let guard = held.write();

    // --- 2. ACTION & ASSERTIONS ---
    // Both calls must return without waiting on the guard.
    let error = collection
        .try_clone()
        .expect_err("A write-locked component cannot be copied");
    assert!(matches!(
        error,
        StorageError::ComponentLocked { component } if component.ends_with("Position")
    ));

    let mut destination = ComponentCollection::new();
    destination.emplace(Velocity::default());
    assert!(destination.try_clone_from(&collection).is_err());
    assert!(
        destination.contains::<Velocity>(),
        "A failed copy leaves the destination untouched"
    );

    drop(guard);
    let copy = collection.try_clone().expect("The guard is released");
    assert_eq!(copy.len(), 2);
    assert!(!held.ptr_eq(&copy.get::<Position>().lock().expect("copied")));
}

#[test]
fn test_try_clone_allows_concurrent_readers() {
    let mut collection = ComponentCollection::new();
    collection.emplace(Position::new(3.0, 3.0));
    let observer = collection.get::<Position>();

    let copy = observer
        .read(|_| collection.try_clone())
        .expect("Position should be alive")
        .expect("A read guard does not block a copy");
    assert_eq!(copy.get::<Position>().read(|p| *p), Some(Position::new(3.0, 3.0)));
}

#[test]
#[should_panic(expected = "locked for writing")]
fn test_clone_panics_inside_write_closure() {
    let mut collection = ComponentCollection::new();
    collection.emplace(Position::default());
    let observer = collection.get::<Position>();
    observer.write(|_| collection.clone());
}

#[test]
fn test_debug_lists_component_names() {
    let mut collection = ComponentCollection::new();
    collection.emplace(Player);
    let rendered = format!("{collection:?}");
    assert!(rendered.contains("Player"), "got {rendered}");
}

// --- ARCHETYPE ---

type Mover = Archetype<(Position, Velocity)>;

#[test]
fn test_archetype_create_instance() {
    let collection = Mover::create_instance();
    assert!(Mover::is_present_in(&collection));
    assert_eq!(collection.len(), 2);
    assert_eq!(Mover::component_count(), 2);
    assert_eq!(collection.get::<Position>().read(|p| *p), Some(Position::default()));
}

#[test]
fn test_archetype_is_present_in_partial_collection() {
    let mut collection = ComponentCollection::new();
    collection.emplace(Position::default());
    assert!(!Mover::is_present_in(&collection));

    collection.emplace(Velocity::default());
    collection.emplace(Player);
    assert!(Mover::is_present_in(&collection));
}

#[test]
fn test_archetype_supplement_twice() {
    // --- 1. SETUP ---
    let mut collection = ComponentCollection::new();
    collection.emplace(Name("existing".to_string()));

    // --- 2. ACTION & ASSERTIONS ---
    assert!(Mover::supplement(&mut collection), "All required types were absent");
    assert!(Mover::is_present_in(&collection));
    assert_eq!(collection.len(), 3);

    assert!(!Mover::supplement(&mut collection), "Everything is already present");
    assert_eq!(collection.len(), 3, "The second pass must not change the size");
}

#[test]
fn test_archetype_supplement_keeps_partial_insertions() {
    // Position is emplaced, Velocity conflicts, Player is never attempted.
    let mut collection = ComponentCollection::new();
    collection.emplace(Velocity { dx: 7.0, dy: 7.0 });

    let supplemented = Archetype::<(Position, Velocity, Player)>::supplement(&mut collection);

    assert!(!supplemented);
    assert!(collection.contains::<Position>(), "Insertions before the conflict stay");
    assert!(!collection.contains::<Player>(), "Types after the conflict are skipped");
    assert_eq!(
        collection.get::<Velocity>().read(|v| *v),
        Some(Velocity { dx: 7.0, dy: 7.0 }),
        "The conflicting component is left untouched"
    );
}

#[test]
fn test_empty_archetype() {
    let collection = Archetype::<()>::create_instance();
    assert!(collection.is_empty());
    assert!(Archetype::<()>::is_present_in(&collection));
    assert_eq!(Archetype::<()>::component_count(), 0);
}

// --- ENTITY ---

#[test]
fn test_new_entity_hangs_off_root() {
    let entity = Entity::default();
    assert_eq!(entity.parent, EntityId::root());
    assert!(entity.is_top_level());
    assert!(entity.children.is_empty());
    assert!(entity.components.is_empty());
}

#[test]
fn test_entity_clone_copies_components() {
    let mut entity = Entity::with_components(Mover::create_instance());
    entity.children.insert(EntityId::new());

    let snapshot = entity.clone();
    entity.components.get::<Position>().write(|p| p.y = -1.0);

    assert_eq!(snapshot.children, entity.children);
    assert_eq!(
        snapshot.components.get::<Position>().read(|p| p.y),
        Some(0.0)
    );
}
