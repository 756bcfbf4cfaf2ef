//! Data types shared by the record store, the query builder and the report
//! writers.

pub mod model;
