pub mod model_config;
