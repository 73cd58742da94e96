//! 按扩展名识别源文件语言

use phf::phf_map;

static LANGUAGES: phf::Map<&'static str, &'static str> = phf_map! {
    "py" => "python",
    "js" => "javascript",
    "ts" => "typescript",
    "java" => "java",
    "cpp" => "cpp",
    "c" => "c",
    "cs" => "csharp",
    "go" => "go",
    "rb" => "ruby",
    "php" => "php",
    "html" => "html",
    "css" => "css",
};

/// 识别不了时返回 `text`
pub fn detect_language(file_name: &str) -> &'static str {
    let Some((_, ext)) = file_name.rsplit_once('.') else {
        return "text";
    };
    LANGUAGES
        .get(ext.to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or("text")
}
