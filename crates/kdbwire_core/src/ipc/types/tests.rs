use crate::ipc::{ElementKind, TypeCatalog, VectorData, code};

#[test]
fn catalog_maps_every_kind_to_its_code() {
	let catalog = &TypeCatalog::STANDARD;
	for kind in ElementKind::ALL {
		assert_eq!(catalog.kind(kind.code()), Some(kind));
		assert_eq!(catalog.kind(-kind.code()), Some(kind), "atom tag resolves to the same kind");
	}
}

#[test]
fn unused_and_composite_codes_have_no_kind() {
	let catalog = &TypeCatalog::STANDARD;
	assert_eq!(catalog.kind(3), None);
	assert_eq!(catalog.kind(code::LIST), None);
	assert_eq!(catalog.kind(code::TABLE), None);
	assert_eq!(catalog.kind(code::ERROR), None);
}

#[test]
fn layout_reports_fixed_widths_only() {
	let catalog = &TypeCatalog::STANDARD;
	assert_eq!(catalog.layout(code::GUID), Some((16, ElementKind::Guid)));
	assert_eq!(catalog.layout(code::SHORT), Some((2, ElementKind::Short)));
	assert_eq!(catalog.layout(code::DATE), Some((4, ElementKind::Date)));
	assert_eq!(catalog.layout(code::DATETIME), Some((8, ElementKind::Datetime)));
	assert_eq!(catalog.layout(code::SYMBOL), None);
}

#[test]
fn allocate_returns_empty_container_of_matching_kind() {
	let catalog = &TypeCatalog::STANDARD;
	for kind in ElementKind::ALL {
		let data = catalog.allocate(kind, 8);
		assert_eq!(data.kind(), kind);
		assert!(data.is_empty());
	}
	assert!(matches!(catalog.allocate(ElementKind::Char, 4), VectorData::Char(text) if text.capacity() >= 4));
}

#[test]
fn enumerations_and_mapped_lists_are_unsupported() {
	let catalog = &TypeCatalog::STANDARD;
	assert!(catalog.is_unsupported(code::DYNAMIC_LOAD));
	assert!(catalog.is_unsupported(20));
	assert!(catalog.is_unsupported(-20));
	assert!(catalog.is_unsupported(-76));
	assert!(catalog.is_unsupported(code::ANYMAP));
	assert!(catalog.is_unsupported(code::MAPPED_LAST));
	assert!(!catalog.is_unsupported(code::TABLE));
	assert!(!catalog.is_unsupported(-77));
	assert!(!catalog.is_unsupported(3));
}
