// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod config;
pub mod doctor;
pub mod exporter;
pub mod favourites;
pub mod history;
pub mod search;
pub mod stocks;
