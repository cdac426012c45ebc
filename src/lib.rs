//! Client-side order lifecycle engine for the Foodly food-ordering platform.
//!
//! The backend owns persistence, authorization, and business rules; this
//! crate owns everything between a screen and that backend:
//!
//! - **Cart staging** — a server-confirmed staging area ([`cart::CartStore`]);
//!   every mutation round-trips and adopts the authoritative response.
//! - **Order placement and status** — typed clients ([`clients`]) and the
//!   pure status machine ([`domain::status`]) that decides which transitions
//!   a screen may even request.
//! - **Reconciliation** — one interval-driven polling primitive
//!   ([`poller::Poller`]) behind every live view ([`tracking`], [`chat`]),
//!   single-flight by construction.
//! - **The review gate** — prompt exactly once per delivered order, across
//!   reloads ([`review_gate::ReviewGate`]).
//!
//! [`app_system::SyncEngine`] wires it all together around one explicit
//! [`session::Session`]; a 401 from any endpoint logs the whole session out.

pub mod app_system;
pub mod cart;
pub mod chat;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod poller;
pub mod review_gate;
pub mod session;
pub mod tracking;
