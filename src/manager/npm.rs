use super::PackageManager;

pub struct NpmManager;

impl PackageManager for NpmManager {
    fn bin(&self) -> &'static str {
        "npm"
    }

    fn add_args(&self, deps: &[String], dev: bool) -> Vec<String> {
        let save = if dev { "--save-dev" } else { "--save" };
        let mut args = vec!["i".to_string(), save.to_string()];
        args.extend(deps.iter().cloned());
        args
    }
}
