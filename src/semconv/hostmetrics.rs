// SPDX-License-Identifier: Apache-2.0

// Datapoint discriminator attributes used by the host metrics receiver.

pub const DEVICE: &str = "device";
pub const DIRECTION: &str = "direction";
pub const STATE: &str = "state";
pub const STATUS: &str = "status";

// Entity attributes on derived system metrics.

pub const DISKIO_DEVICE_NAME: &str = "system.diskio.name";
pub const NETWORK_DEVICE_NAME: &str = "system.network.name";
