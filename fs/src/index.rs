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

use strata_ds::BlockDevice;
use zerocopy::{little_endian::U32, FromBytes, IntoBytes};

use crate::{Cluster, ENTRIES_PER_INDEX};

/// A typed overlay of one cluster as `ENTRIES_PER_INDEX` little-endian
/// cluster pointers.
///
/// An `Index` is just a [`Cluster`] reinterpreted; releasing it flushes the
/// backing cluster the same way, unconditionally.
pub struct Index<'d, D: BlockDevice> {
    cluster: Cluster<'d, D>,
}

impl<'d, D: BlockDevice> Index<'d, D> {
    pub fn acquire(device: &'d D, cluster_no: u32) -> crate::Result<Self> {
        Ok(Self {
            cluster: Cluster::acquire(device, cluster_no)?,
        })
    }

    pub fn cluster_no(&self) -> u32 {
        self.cluster.cluster_no()
    }

    pub fn size(&self) -> usize {
        ENTRIES_PER_INDEX
    }

    pub fn get(&self, i: usize) -> u32 {
        self.entries()[i].get()
    }

    pub fn set(&mut self, i: usize, value: u32) {
        self.entries_mut()[i].set(value);
    }

    /// `true` iff every entry is the null cluster pointer.
    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|entry| entry.get() == 0)
    }

    fn entries(&self) -> &[U32] {
        <[U32]>::ref_from_bytes(self.cluster.data().as_slice())
            .expect("cluster size is a multiple of the index entry width")
    }

    fn entries_mut(&mut self) -> &mut [U32] {
        <[U32]>::mut_from_bytes(self.cluster.data_mut().as_mut_slice())
            .expect("cluster size is a multiple of the index entry width")
    }
}
