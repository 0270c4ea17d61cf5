//! # Archivos Estáticos
//! src/files/mod.rs
//!
//! Resuelve el path de un request contra el directorio raíz y lee el archivo
//! completo a memoria.
//!
//! La resolución es una concatenación literal: raíz `./public` y path
//! `/a/b.html` dan `./public/a/b.html`. No se normaliza nada. La única
//! restricción es que ningún segmento puede ser `..`, para que un request
//! no pueda leer fuera de la raíz.

use crate::http::ParseError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directorio raíz del que se sirven archivos
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: String,
}

impl StaticFiles {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// Convierte el path del request en un path del filesystem
    ///
    /// # Ejemplo
    /// ```
    /// use static_http_server::files::StaticFiles;
    ///
    /// let files = StaticFiles::new("./public");
    /// assert_eq!(
    ///     files.resolve("/a/b.html").unwrap().to_str(),
    ///     Some("./public/a/b.html")
    /// );
    /// assert!(files.resolve("/../etc/passwd").is_err());
    /// ```
    pub fn resolve(&self, path: &str) -> Result<PathBuf, ParseError> {
        if path.split('/').any(|segment| segment == "..") {
            return Err(ParseError::InvalidPath(path.to_string()));
        }
        Ok(PathBuf::from(format!("{}{}", self.root, path)))
    }

    /// Lee el archivo entero. `None` si no existe o no se puede abrir
    /// (incluye directorios y permisos).
    pub fn read(&self, resolved: &Path) -> Option<Vec<u8>> {
        debug!(path = %resolved.display(), "Reading file");

        match fs::read(resolved) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!(path = %resolved.display(), error = %e, "File opening failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn root_with(files: &[(&str, &[u8])]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn test_resolve_concatenates_root_and_path() {
        let files = StaticFiles::new(".");
        assert_eq!(files.resolve("/index.html").unwrap(), PathBuf::from("./index.html"));
    }

    #[test]
    fn test_resolve_rejects_parent_segments() {
        let files = StaticFiles::new("/srv/www");

        assert!(files.resolve("/../secret").is_err());
        assert!(files.resolve("/a/../../secret").is_err());
        assert!(files.resolve("/a/..").is_err());
    }

    #[test]
    fn test_resolve_allows_dots_inside_names() {
        let files = StaticFiles::new("/srv/www");

        assert!(files.resolve("/a..b.html").is_ok());
        assert!(files.resolve("/.well-known/x").is_ok());
    }

    #[test]
    fn test_read_existing_file() {
        let dir = root_with(&[("docs/a.html", b"<p>a</p>")]);
        let files = StaticFiles::new(dir.path().to_str().unwrap());

        let resolved = files.resolve("/docs/a.html").unwrap();
        assert_eq!(files.read(&resolved), Some(b"<p>a</p>".to_vec()));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = root_with(&[]);
        let files = StaticFiles::new(dir.path().to_str().unwrap());

        let resolved = files.resolve("/nope.html").unwrap();
        assert_eq!(files.read(&resolved), None);
    }

    #[test]
    fn test_read_directory_is_none() {
        let dir = root_with(&[("sub/a.txt", b"a")]);
        let files = StaticFiles::new(dir.path().to_str().unwrap());

        let resolved = files.resolve("/sub").unwrap();
        assert_eq!(files.read(&resolved), None);
    }
}
