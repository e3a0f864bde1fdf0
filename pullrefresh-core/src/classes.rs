//! Interaction phase and the `ptr-*` class state on the pull-refresh root

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;

use crate::host::RootElement;

pub const PTR_PULL: &str = "ptr-pull";
pub const PTR_REFRESH: &str = "ptr-refresh";
pub const PTR_LOADING: &str = "ptr-loading";
pub const PTR_RESET: &str = "ptr-reset";

/// Interaction phase. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Panning,
    Loading,
    Resetting,
}

/// The four state classes, as one value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClassFlags {
    pub pull: bool,
    pub refresh: bool,
    pub loading: bool,
    pub reset: bool,
}

impl ClassFlags {
    /// Class name and presence for every flag
    pub fn entries(&self) -> [(&'static str, bool); 4] {
        [
            (PTR_PULL, self.pull),
            (PTR_REFRESH, self.refresh),
            (PTR_LOADING, self.loading),
            (PTR_RESET, self.reset),
        ]
    }

    /// Names of the classes that are present, in declaration order
    pub fn present(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter_map(|(name, on)| on.then_some(name))
            .collect()
    }
}

/// Owner of the phase and the class state of one pull-refresh root.
///
/// All mutations go through [`Stage::transition`] or [`Stage::update`], which
/// derive the `loading` flag from the phase and push the full flag set to the
/// root, so `ptr-loading` and `is_loading()` cannot drift apart.
pub struct Stage {
    root: Rc<dyn RootElement>,
    phase: Cell<Phase>,
    flags: Cell<ClassFlags>,
}

impl Stage {
    pub fn new(root: Rc<dyn RootElement>) -> Self {
        Self {
            root,
            phase: Cell::new(Phase::Idle),
            flags: Cell::new(ClassFlags::default()),
        }
    }

    pub fn root(&self) -> &Rc<dyn RootElement> {
        &self.root
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn flags(&self) -> ClassFlags {
        self.flags.get()
    }

    pub fn is_loading(&self) -> bool {
        self.phase.get() == Phase::Loading
    }

    /// Enter `phase`, edit the remaining flags, and apply the result.
    pub fn transition(&self, phase: Phase, edit: impl FnOnce(&mut ClassFlags)) {
        self.phase.set(phase);
        self.update(edit);
    }

    /// Edit the flags without changing phase, and apply the result.
    pub fn update(&self, edit: impl FnOnce(&mut ClassFlags)) {
        let mut flags = self.flags.get();
        edit(&mut flags);
        flags.loading = self.is_loading();
        self.flags.set(flags);
        self.apply(flags);
    }

    fn apply(&self, flags: ClassFlags) {
        for (name, present) in flags.entries() {
            self.root.set_class(name, present);
        }
    }
}
