//! Investors: models, list filter, form validation, detail view and CRUD.

mod investors_calculator;
mod investors_filter;
mod investors_form;
mod investors_model;
mod investors_service;


pub use investors_calculator::{build_investor_detail, InvestorDetail};
pub use investors_filter::InvestorFilter;
pub use investors_form::InvestorForm;
pub use investors_model::*;
pub use investors_service::{
    DetailOutcome, InvestorsService, InvestorsServiceTrait, CREATED, CREATE_FAILED, DELETED,
    DELETE_FAILED, DETAIL_LOAD_FAILED, INVESTORS_LOAD_FAILED, UPDATED, UPDATE_FAILED,
};
