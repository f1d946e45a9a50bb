//! Mod Lifecycle Runner
//!
//! Turns candidate types into running mod units: construct, init, assign
//! identity, register, sort by priority, then drive the two-phase startup
//! (`on_load` followed immediately by `on_enable`, per unit).
//!
//! Fault containment is per unit: every lifecycle call returns a `Result`
//! captured right here in the loop, converted to a log line and a
//! "drop or leave this unit" decision. One broken mod never stops the rest.

use crate::mods::error::UnitError;
use crate::mods::{
    CandidateType, LifecycleStage, Mod, ModRegistry, ModState, ModUnit, TypeKind, UNSET_IDENTITY,
};

/// Drives the full lifecycle over a batch of discovered candidates.
pub struct LifecycleRunner;

impl LifecycleRunner {
    /// Run the complete pipeline: instantiate-and-init everything, then
    /// load/enable in priority order.
    pub fn run(registry: &mut ModRegistry, candidates: Vec<CandidateType>) {
        Self::instantiate_all(registry, candidates);
        Self::start_all(registry);
    }

    /// Construct, init, and register each candidate.
    ///
    /// A candidate that fails construction or `init` is logged with its type
    /// name and dropped; it never reaches the registry. Units left with the
    /// unset identity sentinel after `init` are assigned their type name,
    /// with a warning. Registration order is discovery order.
    pub fn instantiate_all(registry: &mut ModRegistry, candidates: Vec<CandidateType>) {
        for candidate in candidates {
            // The contract base type is never instantiated.
            if candidate.kind == TypeKind::Base {
                continue;
            }

            let instance = match Self::construct(&candidate) {
                Ok(instance) => instance,
                Err(err) => {
                    log::error!("{err}");
                    continue;
                }
            };

            let mut unit = ModUnit::new(candidate.name.clone(), candidate.binary.clone(), instance);

            if let Err(source) = unit.instance_mut().init() {
                log::error!(
                    "{}",
                    UnitError::Init {
                        type_name: candidate.name.clone(),
                        source,
                    }
                );
                continue;
            }
            unit.state = ModState::Initialized;

            if unit.identity() == UNSET_IDENTITY {
                let fallback = unit.type_name().to_string();
                log::warn!("Mod of type {fallback} has an unset identity, assigning the type name");
                unit.instance_mut().set_identity(fallback);
            }

            unit.state = ModState::Registered;
            log::info!("Initialized mod {}", unit.identity());
            registry.push(unit);
        }
    }

    /// Drive `on_load` then `on_enable` over all registered units, in stable
    /// ascending priority order.
    ///
    /// Both phases run for a unit before the next unit starts. A failing
    /// unit is logged with its identity and left in the registry in whatever
    /// state it reached; iteration continues.
    pub fn start_all(registry: &mut ModRegistry) {
        for index in registry.sorted_by_priority() {
            let Some(unit) = registry.get_mut(index) else {
                continue;
            };

            if let Err(source) = unit.instance_mut().on_load() {
                log::error!(
                    "{}",
                    UnitError::Load {
                        identity: unit.identity().to_string(),
                        source,
                    }
                );
                unit.state = ModState::Failed(LifecycleStage::Load);
                continue;
            }
            unit.state = ModState::Loaded;

            if let Err(source) = unit.instance_mut().on_enable() {
                log::error!(
                    "{}",
                    UnitError::Enable {
                        identity: unit.identity().to_string(),
                        source,
                    }
                );
                unit.state = ModState::Failed(LifecycleStage::Enable);
                continue;
            }
            unit.state = ModState::Enabled;

            log::info!("Loaded mod {}", unit.identity());
        }
    }

    fn construct(candidate: &CandidateType) -> Result<Box<dyn Mod>, UnitError> {
        let ptr = unsafe { (candidate.ctor)() };
        if ptr.is_null() {
            return Err(UnitError::Instantiation {
                type_name: candidate.name.clone(),
                detail: "constructor returned null".to_string(),
            });
        }
        // Ownership transfers to the unit; the library stays alive in the
        // scanner for the process lifetime.
        Ok(unsafe { Box::from_raw(ptr) })
    }
}
