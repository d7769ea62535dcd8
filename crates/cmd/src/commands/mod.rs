// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod build;
pub mod form;
pub mod list;
pub mod show;
pub mod sitemap;
