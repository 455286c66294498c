//! Minimal OBJ parser: positions and 3/4-vertex faces.
//! Quads stay quads; normals, texture coordinates and grouping are skipped.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::{
    error::{AssetError, AssetResult, ParseErrorKind},
    mesh::MeshAsset,
};

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> AssetResult<MeshAsset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| AssetError::Resource {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = load_obj_from_reader(BufReader::new(file), &path.display().to_string())?;
    log::info!(
        "Loaded {}: {} vertices, {} quads, {} triangles",
        path.display(),
        mesh.positions.len(),
        mesh.quad_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
/// `origin` names the source in error messages.
pub fn load_obj_from_reader<R: BufRead>(reader: R, origin: &str) -> AssetResult<MeshAsset> {
    parse_obj(reader, origin)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> AssetResult<MeshAsset> {
    parse_obj(io::Cursor::new(contents), "<memory>")
}

fn parse_obj<R: BufRead>(reader: R, origin: &str) -> AssetResult<MeshAsset> {
    let mut mesh = MeshAsset::default();

    // Split on raw bytes so a bad encoding is reported against its line.
    for (line_no, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes.map_err(|source| AssetError::Resource {
            path: origin.into(),
            source,
        })?;
        let parse_error = |line: &str, kind| AssetError::Parse {
            origin: origin.to_owned(),
            line_no: line_no + 1,
            line: line.trim().to_owned(),
            kind,
        };
        let line = String::from_utf8(bytes).map_err(|e| {
            parse_error(&String::from_utf8_lossy(e.as_bytes()), ParseErrorKind::InvalidUtf8)
        })?;

        parse_line(line.trim(), &mut mesh).map_err(|kind| parse_error(&line, kind))?;
    }

    debug_assert!(mesh.validate().is_ok());
    log::debug!(
        "Parsed {}: {} positions, {} quad indices, {} triangle indices",
        origin,
        mesh.positions.len(),
        mesh.quad_indices.len(),
        mesh.triangle_indices.len()
    );
    Ok(mesh)
}

fn parse_line(line: &str, mesh: &mut MeshAsset) -> Result<(), ParseErrorKind> {
    let mut parts = line.split_whitespace();
    let Some(tag) = parts.next() else {
        return Ok(());
    };

    match tag {
        "v" => {
            let x = parse_f32(parts.next(), "x coordinate")?;
            let y = parse_f32(parts.next(), "y coordinate")?;
            let z = parse_f32(parts.next(), "z coordinate")?;
            mesh.positions.push([x, y, z]);
        }
        "f" => {
            let refs: Vec<&str> = parts.collect();
            let target = match refs.len() {
                4 => &mut mesh.quad_indices,
                3 => &mut mesh.triangle_indices,
                n => return Err(ParseErrorKind::UnsupportedFaceArity(n)),
            };
            let len = mesh.positions.len();
            let resolved = refs
                .iter()
                .map(|token| resolve_index(token, len))
                .collect::<Result<Vec<_>, _>>()?;
            target.extend(resolved);
        }
        _ => {
            // Comments, normals, texture coordinates, groups, materials.
        }
    }
    Ok(())
}

fn parse_f32(value: Option<&str>, what: &'static str) -> Result<f32, ParseErrorKind> {
    let token = value.ok_or(ParseErrorKind::MissingToken(what))?;
    token
        .parse::<f32>()
        .map_err(|_| ParseErrorKind::InvalidNumber(token.to_owned()))
}

/// Resolve the position part of `i`, `i/t`, `i//n` or `i/t/n` to a 0-based index.
fn resolve_index(token: &str, len: usize) -> Result<u32, ParseErrorKind> {
    let pos = token.split('/').next().unwrap_or(token);
    let raw = pos
        .parse::<i64>()
        .map_err(|_| ParseErrorKind::InvalidIndex(token.to_owned()))?;

    let idx = raw - 1;
    if idx < 0 {
        return Err(ParseErrorKind::IndexUnderflow(raw));
    }
    if idx as usize >= len {
        return Err(ParseErrorKind::IndexOutOfRange { index: raw, len });
    }
    u32::try_from(idx).map_err(|_| ParseErrorKind::IndexOutOfRange { index: raw, len })
}
