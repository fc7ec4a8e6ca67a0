pub mod passwords_service;
