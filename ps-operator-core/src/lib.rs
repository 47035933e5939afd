// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

#[allow(unused_extern_crates)]
extern crate self as ps_operator_core;

pub mod crd;
pub mod error;
pub mod provider;
pub mod pushsecret;
