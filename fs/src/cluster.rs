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

use log::error;
use strata_ds::BlockDevice;

use crate::CLUSTER_SIZE;

/// A scoped, in-memory view of one on-disk cluster.
///
/// Acquiring reads the cluster from the device; dropping always writes it
/// back, unconditionally, whether or not the view was actually mutated.
/// At most one live `Cluster` per cluster number is assumed at a time —
/// callers must let one view go out of scope before acquiring another for
/// the same cluster number.
pub struct Cluster<'d, D: BlockDevice> {
    device: &'d D,
    cluster_no: u32,
    data: [u8; CLUSTER_SIZE],
}

impl<'d, D: BlockDevice> Cluster<'d, D> {
    pub fn acquire(device: &'d D, cluster_no: u32) -> crate::Result<Self> {
        let mut data = [0u8; CLUSTER_SIZE];
        device.read_cluster(cluster_no, &mut data)?;
        Ok(Self {
            device,
            cluster_no,
            data,
        })
    }

    pub fn cluster_no(&self) -> u32 {
        self.cluster_no
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn data(&self) -> &[u8; CLUSTER_SIZE] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8; CLUSTER_SIZE] {
        &mut self.data
    }

    pub fn save(&self) -> crate::Result<()> {
        self.device.write_cluster(self.cluster_no, &self.data)
    }
}

impl<'d, D: BlockDevice> Drop for Cluster<'d, D> {
    fn drop(&mut self) {
        if let Err(err) = self.save() {
            error!("failed to flush cluster {}: {err}", self.cluster_no);
        }
    }
}
