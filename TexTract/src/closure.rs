//! Closure expansion
//!
//! A requested texture drags in the rest of its animation cycle and its
//! switch counterpart; a requested flat drags in its animation cycle.
//! Expansion is one level deep: names added here are not expanded again.

use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::formats::{AnimatedKind, is_valid_name, name_key};
use crate::request::ExtractionRequest;
use crate::resolver::PriorityResolver;
use crate::unit::ScanOptions;
use crate::wad::Archive;

/// Expands a request against the patch units of a resolver
pub struct ClosureExpander<'a, A: Archive> {
    resolver: &'a PriorityResolver<A>,
    options: ScanOptions,
}

impl<'a, A: Archive> ClosureExpander<'a, A> {
    /// `options` says whether animation and switch expansion are enabled
    pub fn new(resolver: &'a PriorityResolver<A>, options: ScanOptions) -> Self {
        Self { resolver, options }
    }

    #[must_use]
    pub fn expand(&self, request: &ExtractionRequest) -> ExtractionRequest {
        let mut expanded = ExtractionRequest::new();

        for name in &request.textures {
            if !accept(name, "texture") {
                continue;
            }
            expanded.textures.insert(name_key(name));
            self.expand_texture(name, &mut expanded.textures);
        }

        for name in &request.flats {
            if !accept(name, "flat") {
                continue;
            }
            expanded.flats.insert(name_key(name));
            if self.options.animated {
                for cycle in self.resolver.cycles(AnimatedKind::Flat, name) {
                    add_all(&mut expanded.flats, cycle);
                }
            }
        }

        debug!(
            "Expanded {} textures to {}, {} flats to {}",
            request.textures.len(),
            expanded.textures.len(),
            request.flats.len(),
            expanded.flats.len()
        );
        expanded
    }

    fn expand_texture(&self, name: &str, out: &mut IndexSet<String>) {
        for unit in self.resolver.units() {
            if self.options.animated {
                if let Some(cycle) = unit.texture_cycle(name) {
                    add_all(out, cycle);
                }
            }
            if self.options.switches {
                if let Some(pair) = unit.switch_map().pair_or_default(name) {
                    out.insert(name_key(pair));
                }
            }
        }
    }
}

fn accept(name: &str, kind: &str) -> bool {
    if is_valid_name(name) {
        return true;
    }
    warn!("Skipping invalid {kind} name {name:?}");
    false
}

fn add_all(out: &mut IndexSet<String>, names: &[String]) {
    for name in names {
        out.insert(name_key(name));
    }
}
