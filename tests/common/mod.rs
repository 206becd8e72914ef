// Shared fixtures: type descriptors packed into (optionally gzipped) tarballs.
#![allow(dead_code)]

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use suggestion_loader::archive::ArchiveBlob;
use suggestion_loader::registry::{TypeDescriptor, TypeKind};

/// `com.acme.Order` -> `com/acme/Order.type.json`
pub fn resource_path(name: &str) -> String {
    format!("{}.type.json", name.replace('.', "/"))
}

/// Tarball bytes holding one descriptor resource per type, plus a directory entry.
pub fn tarball(types: &[TypeDescriptor]) -> Vec<u8> {
    let files: Vec<(String, Vec<u8>)> = types
        .iter()
        .map(|t| (resource_path(t.name()), t.to_json().expect("descriptor json")))
        .collect();
    raw_tarball(&files)
}

/// Tarball bytes holding arbitrary `(path, contents)` files.
pub fn raw_tarball(files: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());

    let mut dir = tar::Header::new_gnu();
    dir.set_entry_type(tar::EntryType::Directory);
    dir.set_size(0);
    dir.set_mode(0o755);
    dir.set_cksum();
    builder
        .append_data(&mut dir, "com/", std::io::empty())
        .expect("directory entry");

    for (path, contents) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, path, contents.as_slice())
            .expect("file entry");
    }
    builder.into_inner().expect("finished tarball")
}

pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).expect("gzip write");
    encoder.finish().expect("gzip finish")
}

pub fn archive(label: &str, types: &[TypeDescriptor]) -> ArchiveBlob {
    ArchiveBlob::named(label, tarball(types))
}

/// Bytes no tar reader accepts: the header checksum never matches.
pub fn corrupt_archive() -> ArchiveBlob {
    ArchiveBlob::named("corrupt.tar", vec![0xAB; 600])
}

/// `com.acme.Order` with a numeric total, a customer name, some lines and the
/// noise members authors never want to see.
pub fn order_type() -> TypeDescriptor {
    TypeDescriptor::new("com.acme.Order", TypeKind::Class)
        .field("total", "java.math.BigDecimal")
        .field("customerName", "java.lang.String")
        .field("lines", "java.util.List")
        .field("placed", "java.util.Date")
        .field("hashCode", "int")
}

pub fn sorted(names: &[String]) -> Vec<String> {
    let mut names = names.to_vec();
    names.sort();
    names
}
