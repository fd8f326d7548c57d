use serde::Serialize;

/// Container kinds recognised from the header type tag
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum ContainerKind {
    Vi,      // "LVIN"
    Control, // "LVCC"
    Library, // "LVAR"
    Unknown,
}

/// Every container starts with this id prefix
pub const RESOURCE_MAGIC: &[u8; 4] = b"RSRC";

/// Cheap check for the resource id at the start of a buffer
pub fn is_resource_container(data: &[u8]) -> bool {
    data.starts_with(RESOURCE_MAGIC)
}

/// Map a header type tag to a kind
pub fn kind_from_type(tag: &[u8; 4]) -> ContainerKind {
    match tag {
        b"LVIN" => ContainerKind::Vi,
        b"LVCC" => ContainerKind::Control,
        b"LVAR" => ContainerKind::Library,
        _ => ContainerKind::Unknown,
    }
}

/// Detect the container kind from its header, falling back to the file extension
pub fn detect_kind(data: &[u8], filename: Option<&str>) -> ContainerKind {
    if is_resource_container(data) && data.len() >= 12 {
        let mut tag = [0u8; 4];
        tag.copy_from_slice(&data[8..12]);
        return detect_kind_from_tag(&tag, filename);
    }
    kind_from_extension(filename)
}

/// Same as `detect_kind` for an already decoded header type tag
pub fn detect_kind_from_tag(tag: &[u8; 4], filename: Option<&str>) -> ContainerKind {
    match kind_from_type(tag) {
        ContainerKind::Unknown => kind_from_extension(filename),
        kind => kind,
    }
}

fn kind_from_extension(filename: Option<&str>) -> ContainerKind {
    let Some(name) = filename else {
        return ContainerKind::Unknown;
    };
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "vi" | "vit" => ContainerKind::Vi,
        "ctl" | "ctt" => ContainerKind::Control,
        "llb" => ContainerKind::Library,
        _ => ContainerKind::Unknown,
    }
}

/// Get a human-readable name for a container kind
pub fn kind_name(kind: &ContainerKind) -> &'static str {
    match kind {
        ContainerKind::Vi => "VI",
        ContainerKind::Control => "Control",
        ContainerKind::Library => "VI Library",
        ContainerKind::Unknown => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::Fixture;

    #[test]
    fn test_detect_vi_by_header() {
        let built = Fixture::new().block(b"LVSR", &[b"x"]).build();
        assert_eq!(detect_kind(&built.bytes, None), ContainerKind::Vi);
    }

    #[test]
    fn test_detect_control_by_header() {
        let built = Fixture::new()
            .resource_type(b"LVCC")
            .block(b"LVSR", &[b"x"])
            .build();
        assert_eq!(
            detect_kind(&built.bytes, Some("misnamed.vi")),
            ContainerKind::Control
        );
    }

    #[test]
    fn test_detect_library_by_header() {
        let built = Fixture::new()
            .resource_type(b"LVAR")
            .block(b"LIBN", &[b"x"])
            .build();
        assert_eq!(detect_kind(&built.bytes, None), ContainerKind::Library);
    }

    #[test]
    fn test_unknown_type_falls_back_to_extension() {
        let built = Fixture::new()
            .resource_type(b"LMNU")
            .block(b"LVSR", &[b"x"])
            .build();
        assert_eq!(
            detect_kind(&built.bytes, Some("Tools.LLB")),
            ContainerKind::Library
        );
        assert_eq!(detect_kind(&built.bytes, None), ContainerKind::Unknown);
    }

    #[test]
    fn test_detect_by_extension_only() {
        assert_eq!(detect_kind(b"", Some("main.vi")), ContainerKind::Vi);
        assert_eq!(detect_kind(b"", Some("enum.ctl")), ContainerKind::Control);
        assert_eq!(detect_kind(b"", Some("notes.txt")), ContainerKind::Unknown);
        assert_eq!(detect_kind(b"", None), ContainerKind::Unknown);
    }

    #[test]
    fn test_tag_overrides_extension() {
        assert_eq!(
            detect_kind_from_tag(b"LVAR", Some("x.vi")),
            ContainerKind::Library
        );
        assert_eq!(detect_kind_from_tag(b"????", Some("x.ctl")), ContainerKind::Control);
    }

    #[test]
    fn test_short_magic_only() {
        assert!(is_resource_container(b"RSRC\r\n"));
        assert!(!is_resource_container(b"RSR"));
        assert_eq!(detect_kind(b"RSRC\r\n", None), ContainerKind::Unknown);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(kind_name(&ContainerKind::Vi), "VI");
        assert_eq!(kind_name(&ContainerKind::Control), "Control");
        assert_eq!(kind_name(&ContainerKind::Library), "VI Library");
        assert_eq!(kind_name(&ContainerKind::Unknown), "Unknown");
    }
}
