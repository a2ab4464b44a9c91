// SPDX-License-Identifier: Apache-2.0

pub mod exporters;
pub mod otlp;
pub mod processors;
pub mod semconv;
