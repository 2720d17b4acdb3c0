// Copyright 2026 The Strata Authors
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

//! Two-level indexed cluster file system core.
//!
//! Every file is rooted at a first-level [`Index`] cluster (`L1`); each
//! nonzero entry there points to a second-level `Index` cluster (`L2`);
//! each nonzero entry there points to a data [`Cluster`]. A [`Volume`]
//! glues a [`BitVector`] free-space allocator and the root directory's
//! `L1` onto a [`BlockDevice`], and hands out the scoped [`Cluster`] /
//! [`Index`] views that [`FileEngine`] drives.

pub use strata_ds::{BlockDevice, Error, Result};

mod bitvector;
mod cluster;
mod file_engine;
mod index;
mod volume;

pub use bitvector::BitVector;
pub use cluster::Cluster;
pub use file_engine::{EofState, FileEngine, Mode};
pub use index::Index;
pub use volume::Volume;

/// Bytes in one cluster. Fixed for the lifetime of a binary: this engine
/// does not support mounting volumes with a different cluster size.
pub const CLUSTER_SIZE: usize = 2048;

/// On-disk width of one [`Index`] entry (a little-endian cluster pointer).
pub const INDEX_ENTRY_SIZE: usize = 4;

/// Cluster pointers per index cluster: `CLUSTER_SIZE / INDEX_ENTRY_SIZE`.
pub const ENTRIES_PER_INDEX: usize = CLUSTER_SIZE / INDEX_ENTRY_SIZE;

/// Largest byte length representable by the two-level layout:
/// `ENTRIES_PER_INDEX^2 * CLUSTER_SIZE`.
pub const MAX_FILE_SIZE: u64 =
    (ENTRIES_PER_INDEX as u64) * (ENTRIES_PER_INDEX as u64) * (CLUSTER_SIZE as u64);

/// The reserved "unallocated" cluster pointer value.
pub const NULL_CLUSTER: u32 = 0;

#[cfg(test)]
pub(crate) mod testutil;
