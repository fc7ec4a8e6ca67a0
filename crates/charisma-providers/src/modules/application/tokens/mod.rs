pub mod tokens_service;
