use config::Config;

pub trait GetConfig {
    fn config(&self) -> &Config;
}
