// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

//! Assorted utility code.

pub mod futures;
