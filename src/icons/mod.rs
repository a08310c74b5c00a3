//! Tracked icon entities and their placement on the map image.

use crate::capture::SceneCapture;
use crate::style::MapStyle;
use crate::view::ViewRect;
use glamx::{Vec2, Vec3};
use std::collections::HashMap;
use std::hash::Hash;

/// Visual parameters of one tracked icon.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedIcon {
    /// Rendered size of the icon, in map pixels.
    pub size: Vec2,
    /// Whether the icon stays pinned to the edge of the visible rectangle
    /// instead of scrolling out of view.
    pub clamp_to_edge: bool,
}

impl PlacedIcon {
    pub fn new(size: Vec2, clamp_to_edge: bool) -> PlacedIcon {
        PlacedIcon {
            size,
            clamp_to_edge,
        }
    }

    /// An icon using the style's default size.
    pub fn from_style(style: &MapStyle, clamp_to_edge: bool) -> PlacedIcon {
        PlacedIcon::new(style.icon_size, clamp_to_edge)
    }
}

/// Resolves a world position to its on-map icon position.
///
/// Non-clamped icons take the raw projected position and may land outside
/// the visible rectangle; callers typically cull those at render time.
/// Clamped icons are pinned per-axis onto the rectangle's boundary when the
/// projection falls outside it.
pub fn resolve_placement(
    capture: &SceneCapture,
    view_rect: ViewRect,
    world_position: Vec3,
    clamp_to_edge: bool,
) -> Vec2 {
    let on_map = capture.project_to_map_2d(world_position);
    if clamp_to_edge && !view_rect.contains(on_map) {
        view_rect.clamp(on_map)
    } else {
        on_map
    }
}

/// The set of entities currently represented on the map.
///
/// The layer owns only the association from entity identity to icon
/// parameters; the entities themselves live in the scene layer, and their
/// world positions are read live at placement time.
#[derive(Clone, Debug)]
pub struct IconLayer<K> {
    icons: HashMap<K, PlacedIcon>,
}

impl<K> Default for IconLayer<K> {
    fn default() -> Self {
        IconLayer {
            icons: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> IconLayer<K> {
    pub fn new() -> IconLayer<K> {
        IconLayer::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.icons.contains_key(key)
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<&PlacedIcon> {
        self.icons.get(key)
    }

    /// Starts tracking an entity. A no-op if it is already tracked; returns
    /// whether the entry was added.
    pub fn add(&mut self, key: K, icon: PlacedIcon) -> bool {
        if self.icons.contains_key(&key) {
            return false;
        }
        self.icons.insert(key, icon);
        true
    }

    /// Stops tracking an entity. A no-op if it is not tracked; returns
    /// whether an entry was removed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.icons.remove(key).is_some()
    }

    pub fn remove_all(&mut self) {
        self.icons.clear();
    }

    /// Replaces the tracked set: entities absent from `entries` are
    /// dropped, new ones are added, and entities present in both keep their
    /// existing icon parameters.
    pub fn set_all(&mut self, entries: impl IntoIterator<Item = (K, PlacedIcon)>) {
        let mut next = HashMap::new();
        for (key, icon) in entries {
            let icon = self.icons.remove(&key).unwrap_or(icon);
            next.entry(key).or_insert(icon);
        }
        self.icons = next;
    }

    /// Places one tracked entity, or `None` if it is not tracked.
    pub fn place(
        &self,
        key: &K,
        world_position: Vec3,
        capture: &SceneCapture,
        view_rect: ViewRect,
    ) -> Option<Vec2> {
        let icon = self.icons.get(key)?;
        Some(resolve_placement(
            capture,
            view_rect,
            world_position,
            icon.clamp_to_edge,
        ))
    }

    /// Places every tracked entity, reading each world position live through
    /// `world_position`.
    pub fn placements<'a, F>(
        &'a self,
        capture: &'a SceneCapture,
        view_rect: ViewRect,
        mut world_position: F,
    ) -> impl Iterator<Item = (&'a K, Vec2)> + 'a
    where
        F: FnMut(&K) -> Vec3 + 'a,
    {
        self.icons.iter().map(move |(key, icon)| {
            let placed = resolve_placement(
                capture,
                view_rect,
                world_position(key),
                icon.clamp_to_edge,
            );
            (key, placed)
        })
    }

    /// Iterates over the tracked entries without placing them.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &PlacedIcon)> {
        self.icons.iter()
    }
}
