use anyhow::Result;
use serde::Serialize;

pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", to_string(value)?);
    Ok(())
}

fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DependencyDescriptor, LicenseReport};
    use url::Url;

    #[test]
    fn test_missing_license_is_null() {
        let dep = DependencyDescriptor::new("foo", Url::parse("https://example.com/foo").unwrap())
            .unwrap();
        let json = to_string(&[LicenseReport::new(&dep, None)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "foo");
        assert_eq!(value[0]["repository_url"], "https://example.com/foo");
        assert!(value[0]["license"].is_null());
    }
}
