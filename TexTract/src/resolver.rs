//! Priority resolver
//!
//! Patch units are searched in the order they were given; the first one
//! that has a name wins. The base unit is never searched.

use crate::formats::AnimatedKind;
use crate::unit::SourceUnit;
use crate::wad::{Archive, WadFile};

/// The base unit plus the ordered patch units
#[derive(Debug)]
pub struct PriorityResolver<A: Archive = WadFile> {
    base: SourceUnit<A>,
    units: Vec<SourceUnit<A>>,
}

impl<A: Archive> PriorityResolver<A> {
    pub fn new(base: SourceUnit<A>, units: Vec<SourceUnit<A>>) -> Self {
        Self { base, units }
    }

    #[must_use]
    pub fn base(&self) -> &SourceUnit<A> {
        &self.base
    }

    /// Patch units, highest priority first
    #[must_use]
    pub fn units(&self) -> &[SourceUnit<A>] {
        &self.units
    }

    /// First unit whose texture set defines `name`
    #[must_use]
    pub fn find_texture(&self, name: &str) -> Option<&SourceUnit<A>> {
        self.units.iter().find(|u| u.texture_set().contains(name))
    }

    /// First unit with `name` in its flat namespace
    #[must_use]
    pub fn find_flat(&self, name: &str) -> Option<&SourceUnit<A>> {
        self.units.iter().find(|u| u.has_flat(name))
    }

    /// First unit with `name` in its texture namespace
    #[must_use]
    pub fn find_namespace_texture(&self, name: &str) -> Option<&SourceUnit<A>> {
        self.units
            .iter()
            .find(|u| u.namespace_texture_entry(name).is_some())
    }

    /// Animation cycle of `name` from every unit that has one, highest priority first
    pub fn cycles<'a>(&'a self, kind: AnimatedKind, name: &'a str) -> impl Iterator<Item = &'a [String]> + 'a {
        self.units.iter().filter_map(move |u| match kind {
            AnimatedKind::Texture => u.texture_cycle(name),
            AnimatedKind::Flat => u.flat_cycle(name),
        })
    }
}
