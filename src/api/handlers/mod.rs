//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod cities;
pub mod city_markets;
pub mod health;
pub mod supermarkets;
