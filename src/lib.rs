// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod favourites;
pub mod filter;
pub mod history;
pub mod models;
pub mod store;
pub mod utils;
pub mod worker;
