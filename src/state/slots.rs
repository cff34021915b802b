/// The three triptych slots and drag-and-drop resolution
///
/// `SlotStore` owns the image in each slot. Every mutation bumps that slot's
/// generation so that background imports started before the mutation can be
/// recognised as stale when they complete.
use super::data::SlotImage;
use log::{debug, info};
use std::fmt;

/// One of the three fixed panel positions, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotPosition {
    Left,
    Center,
    Right,
}

impl SlotPosition {
    pub const ALL: [SlotPosition; 3] = [SlotPosition::Left, SlotPosition::Center, SlotPosition::Right];

    /// Horizontal index on the canvas
    pub fn index(self) -> usize {
        match self {
            SlotPosition::Left => 0,
            SlotPosition::Center => 1,
            SlotPosition::Right => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotPosition::Left => "Left Panel",
            SlotPosition::Center => "Center Panel",
            SlotPosition::Right => "Right Panel",
        }
    }
}

impl fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SlotPosition::Left => "left",
            SlotPosition::Center => "center",
            SlotPosition::Right => "right",
        })
    }
}

/// An in-progress drag: the image being carried and where it came from.
///
/// `source` is `None` when the image arrived from outside the app.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub image: SlotImage,
    pub source: Option<SlotPosition>,
}

impl DragSession {
    /// A drag that started on one of our own slots
    pub fn from_slot(source: SlotPosition, image: SlotImage) -> Self {
        Self { image, source: Some(source) }
    }

    /// A drag whose payload came from the host (file manager, browser, ...)
    pub fn external(image: SlotImage) -> Self {
        Self { image, source: None }
    }
}

/// What a drop did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Dragged image moved into the target; the target's old content moved to the source
    Swapped { source: SlotPosition, target: SlotPosition },
    /// External image replaced the target's content
    Imported { target: SlotPosition },
    /// Dropped back onto its own slot
    Unchanged,
}

/// Contents of the left, center and right slots
#[derive(Debug, Clone, Default)]
pub struct SlotStore {
    images: [Option<SlotImage>; 3],
    generations: [u64; 3],
}

impl SlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: SlotPosition) -> Option<&SlotImage> {
        self.images[slot.index()].as_ref()
    }

    /// Replace the slot's content, releasing whatever it held
    pub fn set(&mut self, slot: SlotPosition, image: Option<SlotImage>) {
        let i = slot.index();
        self.images[i] = image;
        self.generations[i] += 1;
    }

    pub fn clear(&mut self, slot: SlotPosition) {
        self.set(slot, None);
    }

    /// Exchange the contents of two slots. No-op when `a == b`.
    pub fn swap(&mut self, a: SlotPosition, b: SlotPosition) {
        if a == b {
            return;
        }
        self.images.swap(a.index(), b.index());
        self.generations[a.index()] += 1;
        self.generations[b.index()] += 1;
    }

    /// Counter bumped by every mutation of `slot`
    pub fn generation(&self, slot: SlotPosition) -> u64 {
        self.generations[slot.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.images.iter().all(Option::is_none)
    }

    /// Slot contents ordered left to right
    pub fn images(&self) -> [Option<SlotImage>; 3] {
        self.images.clone()
    }

    pub fn first_empty(&self) -> Option<SlotPosition> {
        SlotPosition::ALL.into_iter().find(|slot| self.get(*slot).is_none())
    }

    /// Resolve a drop of `session` onto `target`.
    ///
    /// Takes the session by value: once a drop has been handled, the drag is
    /// over whichever branch ran.
    pub fn drop_onto(&mut self, target: SlotPosition, session: DragSession) -> DropOutcome {
        match session.source {
            Some(source) if source != target => {
                let displaced = self.images[target.index()].take();
                self.set(target, Some(session.image));
                self.set(source, displaced);
                info!("Swapped images: {source} <-> {target}");
                DropOutcome::Swapped { source, target }
            }
            None => {
                info!("Imported {} into {target} slot", session.image.name());
                self.set(target, Some(session.image));
                DropOutcome::Imported { target }
            }
            Some(_) => {
                debug!("Dropped image back onto {target} slot, nothing to do");
                DropOutcome::Unchanged
            }
        }
    }

    /// Apply a background import, unless the slot changed since it was requested.
    ///
    /// Returns `None` (and leaves the store untouched) for stale completions.
    pub fn apply_import(
        &mut self,
        target: SlotPosition,
        requested_at: u64,
        image: SlotImage,
    ) -> Option<DropOutcome> {
        if self.generation(target) != requested_at {
            info!(
                "Discarding stale import of {} into {target} slot (generation {requested_at}, now {})",
                image.name(),
                self.generation(target)
            );
            return None;
        }
        Some(self.drop_onto(target, DragSession::external(image)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbaImage};

    fn image(name: &str) -> SlotImage {
        SlotImage::new(name, DynamicImage::ImageRgba8(RgbaImage::new(8, 8)))
    }

    fn snapshot(store: &SlotStore) -> [Option<u64>; 3] {
        SlotPosition::ALL.map(|slot| store.get(slot).map(SlotImage::id))
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = SlotStore::new();
        assert!(store.is_empty());
        assert_eq!(store.first_empty(), Some(SlotPosition::Left));
    }

    #[test]
    fn test_set_and_clear() {
        let mut store = SlotStore::new();
        let a = image("a");

        store.set(SlotPosition::Center, Some(a.clone()));
        assert_eq!(store.get(SlotPosition::Center), Some(&a));
        assert!(!store.is_empty());

        store.clear(SlotPosition::Center);
        assert_eq!(store.get(SlotPosition::Center), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_swap_is_an_involution() {
        let cases = [
            (Some(image("x")), Some(image("y"))),
            (Some(image("x")), None),
            (None, Some(image("y"))),
            (None, None),
        ];
        let pairs = [
            (SlotPosition::Left, SlotPosition::Center),
            (SlotPosition::Left, SlotPosition::Right),
            (SlotPosition::Center, SlotPosition::Right),
        ];

        for (x, y) in &cases {
            for &(a, b) in &pairs {
                let mut store = SlotStore::new();
                store.set(a, x.clone());
                store.set(b, y.clone());
                let before = snapshot(&store);

                store.swap(a, b);
                assert_eq!(store.get(a), y.as_ref());
                assert_eq!(store.get(b), x.as_ref());

                store.swap(a, b);
                assert_eq!(snapshot(&store), before);
            }
        }
    }

    #[test]
    fn test_swap_same_slot_is_noop() {
        let mut store = SlotStore::new();
        store.set(SlotPosition::Left, Some(image("a")));
        let generation = store.generation(SlotPosition::Left);
        let before = snapshot(&store);

        store.swap(SlotPosition::Left, SlotPosition::Left);

        assert_eq!(snapshot(&store), before);
        assert_eq!(store.generation(SlotPosition::Left), generation);
    }

    #[test]
    fn test_drop_between_slots_swaps() {
        let mut store = SlotStore::new();
        let a = image("a");
        let b = image("b");
        store.set(SlotPosition::Left, Some(a.clone()));
        store.set(SlotPosition::Right, Some(b.clone()));

        let session = DragSession::from_slot(SlotPosition::Left, a.clone());
        let outcome = store.drop_onto(SlotPosition::Right, session);

        assert_eq!(
            outcome,
            DropOutcome::Swapped { source: SlotPosition::Left, target: SlotPosition::Right }
        );
        assert_eq!(store.get(SlotPosition::Right), Some(&a));
        assert_eq!(store.get(SlotPosition::Left), Some(&b));
    }

    #[test]
    fn test_drop_onto_empty_slot_clears_source() {
        let mut store = SlotStore::new();
        let a = image("a");
        store.set(SlotPosition::Left, Some(a.clone()));

        store.drop_onto(SlotPosition::Center, DragSession::from_slot(SlotPosition::Left, a.clone()));

        assert_eq!(store.get(SlotPosition::Center), Some(&a));
        assert_eq!(store.get(SlotPosition::Left), None);
    }

    #[test]
    fn test_external_drop_replaces_and_discards() {
        let mut store = SlotStore::new();
        let left = image("left");
        let old = image("old");
        let new = image("new");
        store.set(SlotPosition::Left, Some(left.clone()));
        store.set(SlotPosition::Center, Some(old.clone()));

        let outcome = store.drop_onto(SlotPosition::Center, DragSession::external(new.clone()));

        assert_eq!(outcome, DropOutcome::Imported { target: SlotPosition::Center });
        assert_eq!(store.get(SlotPosition::Center), Some(&new));
        // The displaced image is not relocated anywhere.
        assert_eq!(store.get(SlotPosition::Left), Some(&left));
        assert_eq!(store.get(SlotPosition::Right), None);
        assert!(SlotPosition::ALL.iter().all(|s| store.get(*s) != Some(&old)));
    }

    #[test]
    fn test_same_slot_drop_changes_nothing() {
        let mut store = SlotStore::new();
        let a = image("a");
        let b = image("b");
        store.set(SlotPosition::Left, Some(a.clone()));
        store.set(SlotPosition::Center, Some(b));
        let before = snapshot(&store);

        let outcome = store.drop_onto(SlotPosition::Left, DragSession::from_slot(SlotPosition::Left, a));

        assert_eq!(outcome, DropOutcome::Unchanged);
        assert_eq!(snapshot(&store), before);
    }

    #[test]
    fn test_stale_import_is_discarded() {
        let mut store = SlotStore::new();
        let requested_at = store.generation(SlotPosition::Right);

        // The user fills the slot while the decode is still running.
        let newer = image("newer");
        store.set(SlotPosition::Right, Some(newer.clone()));

        assert_eq!(store.apply_import(SlotPosition::Right, requested_at, image("late")), None);
        assert_eq!(store.get(SlotPosition::Right), Some(&newer));
    }

    #[test]
    fn test_current_import_is_applied() {
        let mut store = SlotStore::new();
        let requested_at = store.generation(SlotPosition::Right);
        let img = image("fresh");

        let outcome = store.apply_import(SlotPosition::Right, requested_at, img.clone());

        assert_eq!(outcome, Some(DropOutcome::Imported { target: SlotPosition::Right }));
        assert_eq!(store.get(SlotPosition::Right), Some(&img));
    }
}
