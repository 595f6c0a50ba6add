use super::PackageManager;

pub struct YarnManager;

impl PackageManager for YarnManager {
    fn bin(&self) -> &'static str {
        "yarn"
    }

    fn add_args(&self, deps: &[String], dev: bool) -> Vec<String> {
        let mut args = vec!["add".to_string()];
        if dev {
            args.push("--dev".to_string());
        }
        args.extend(deps.iter().cloned());
        args
    }
}
