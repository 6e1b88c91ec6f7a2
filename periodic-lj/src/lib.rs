#![warn(clippy::all, clippy::pedantic)]

// disable some style lints
#![allow(clippy::needless_return, clippy::must_use_candidate, clippy::comparison_chain)]
#![allow(clippy::redundant_field_names, clippy::redundant_closure_for_method_calls)]
#![allow(clippy::unreadable_literal, clippy::option_if_let_else, clippy::range_plus_one)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::module_name_repetitions)]

#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap, clippy::cast_lossless, clippy::cast_sign_loss)]
#![allow(clippy::default_trait_access, clippy::float_cmp)]

// Tests lints
#![cfg_attr(test, allow(clippy::many_single_char_names))]

//! Energy, forces and stress of periodic configurations of particles
//! interacting with the Lennard-Jones pair potential.
//!
//! Pairs of particles are enumerated across the periodic images of the unit
//! cell, either with a dense tensor of distances ([`get_distances`]) or
//! with a one-way neighbor list ([`get_neighbors_oneway`]). Forces and
//! stress are obtained by differentiating the pair energy expression with
//! dual numbers.

pub mod types;
pub use types::*;

pub mod math;

mod errors;
pub use self::errors::Error;

pub mod systems;
pub use systems::{UnitCell, Configuration, CellShift, CellImages};
pub use systems::{DenseDistances, OneWayNeighbors};
pub use systems::{get_distances, get_neighbors_oneway};

pub mod potentials;
pub use potentials::{PairPotential, LennardJones, LennardJonesParameters};

mod calculator;
pub use calculator::{Calculator, CalculationOptions, NeighborStrategy, Evaluation, DEFAULT_SKIN};
pub use calculator::{energy, forces, stress};
