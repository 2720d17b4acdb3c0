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

//! An in-memory [`BlockDevice`] used only by this crate's own tests, so the
//! engine's unit tests never touch disk.

use std::cell::RefCell;

use strata_ds::{BlockDevice, Error};

use crate::CLUSTER_SIZE;

pub struct MemoryBlockDevice {
    clusters: RefCell<Vec<[u8; CLUSTER_SIZE]>>,
}

impl MemoryBlockDevice {
    pub fn new(num_clusters: u32) -> Self {
        Self {
            clusters: RefCell::new(vec![[0u8; CLUSTER_SIZE]; num_clusters as usize]),
        }
    }
}

impl BlockDevice for MemoryBlockDevice {
    fn num_clusters(&self) -> u32 {
        self.clusters.borrow().len() as u32
    }

    fn read_cluster(&self, cluster_no: u32, buffer: &mut [u8]) -> strata_ds::Result<()> {
        let clusters = self.clusters.borrow();
        let cluster = clusters
            .get(cluster_no as usize)
            .ok_or(Error::OutOfRange(cluster_no as u64))?;
        buffer.copy_from_slice(cluster);
        Ok(())
    }

    fn write_cluster(&self, cluster_no: u32, buffer: &[u8]) -> strata_ds::Result<()> {
        let mut clusters = self.clusters.borrow_mut();
        let cluster = clusters
            .get_mut(cluster_no as usize)
            .ok_or(Error::OutOfRange(cluster_no as u64))?;
        cluster.copy_from_slice(buffer);
        Ok(())
    }
}
