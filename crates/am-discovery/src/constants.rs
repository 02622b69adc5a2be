/// Any of these present means the directory is a project
pub const INSTANT_PROJECT_MARKERS: &[&str] = &[
    "README.md",
    "README.txt",
    "package.json",
    ".gitignore",
    "requirements.txt",
    ".env",
    "yarn.lock",
    "package-lock.json",
    "vite.config.js",
    "vite.config.ts",
    ".git",
    "src",
    "app",
    ".github",
    ".vscode",
    ".venv",
    "venv",
];

/// Neither counted as project evidence nor analyzed
pub const JUNK_FILES: &[&str] = &[".DS_Store", "thumbs.db"];

/// Junk plus framework boilerplate
pub const IGNORE_FILES: &[&str] = &[
    ".DS_Store",
    "thumbs.db",
    "manage.py",
    "wsgi.py",
    "asgi.py",
    "settings.py",
    "urls.py",
];

pub const IGNORE_EXTENSIONS: &[&str] = &[".jar", ".sql", ".db", ".sqlite", ".sqlite3"];

pub const IGNORE_DIRS: &[&str] = &[
    ".devcontainer",
    ".github",
    ".vscode",
    ".git",
    ".pytest_cache",
    // virtual environments
    ".venv",
    "venv",
    "env",
    "virtualenv",
    "site-packages",
    "node_modules",
    "newenv",
    "myenv",
    // build output
    "target",
    "build",
    "dist",
    "__pycache__",
    "migrations",
    // installed libraries
    "lib",
    "lib64",
    "bin",
    "include",
    "share",
];

/// Resource-fork folder added by macOS archivers
pub const MACOSX_DIR: &str = "__MACOSX";
