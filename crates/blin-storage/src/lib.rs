//! # blin-storage: Durable Slots for the Blin Storefront
//!
//! Named key-value slots that survive restarts, plus the repositories that
//! read and write the cart and the consent flag through them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  CartStore::add_item                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   blin-storage (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Storage     │    │  Repositories  │    │  SlotStore   │  │   │
//! │  │   │ (storage.rs)  │───►│ CartRepository │───►│ FileSlots    │  │   │
//! │  │   │               │    │ ConsentRepo    │    │ MemorySlots  │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/blin-storefront/slots/blinCart.json                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`slot`] - The `SlotStore` trait and the in-memory store
//! - [`file`] - File-per-slot store
//! - [`storage`] - `Storage` handle and `StorageConfig`
//! - [`repository`] - Cart and consent repositories
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use blin_core::Money;
//! use blin_storage::{Storage, StorageConfig};
//!
//! let storage = Storage::open(StorageConfig::in_memory()).unwrap();
//!
//! let mut cart = storage.cart().load();
//! cart.add_item("blin-1", "Блин", Money::from_units(120)).unwrap();
//! storage.cart().save(&cart).unwrap();
//!
//! assert_eq!(storage.cart().load(), cart);
//! ```

pub mod error;
pub mod file;
pub mod repository;
pub mod slot;
pub mod storage;

pub use error::{StorageError, StorageResult};
pub use file::FileSlotStore;
pub use repository::cart::CartRepository;
pub use repository::consent::ConsentRepository;
pub use slot::{MemorySlotStore, SharedSlots, SlotStore};
pub use storage::{Storage, StorageConfig};
