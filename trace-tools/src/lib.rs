/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Producers of simulator trace files.
//!
//! * [`alibaba`] – conversion of a raw Alibaba GPU cluster instance table
//! * [`synthetic`] – seeded random workloads

pub mod alibaba;
pub mod synthetic;
