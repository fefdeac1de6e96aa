// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Display colors for repository languages, following GitHub linguist.

/// Color used for languages missing from the table.
pub const FALLBACK_LANGUAGE_COLOR: &str = "#8b8b8b";

/// Returns the display color associated with a language name.
///
/// Lookup is exact on the linguist spelling; unknown names resolve to
/// [`FALLBACK_LANGUAGE_COLOR`].
///
/// # Examples
///
/// ```
/// use gitfolio::{FALLBACK_LANGUAGE_COLOR, language_color};
///
/// assert_eq!(language_color("Rust"), "#dea584");
/// assert_eq!(language_color("Klingon"), FALLBACK_LANGUAGE_COLOR);
/// ```
pub fn language_color(language: &str,) -> &'static str
{
    match language {
        "Astro" => "#ff5a03",
        "C" => "#555555",
        "C#" => "#178600",
        "C++" => "#f34b7d",
        "Clojure" => "#db5855",
        "CSS" => "#563d7c",
        "Dart" => "#00B4AB",
        "Dockerfile" => "#384d54",
        "Elixir" => "#6e4a7e",
        "Elm" => "#60B5CC",
        "Erlang" => "#B83998",
        "F#" => "#b845fc",
        "Go" => "#00ADD8",
        "Groovy" => "#4298b8",
        "Haskell" => "#5e5086",
        "HCL" => "#844FBA",
        "HTML" => "#e34c26",
        "Java" => "#b07219",
        "JavaScript" => "#f1e05a",
        "Julia" => "#a270ba",
        "Jupyter Notebook" => "#DA5B0B",
        "Kotlin" => "#A97BFF",
        "Lua" => "#000080",
        "Makefile" => "#427819",
        "MDX" => "#fcb32c",
        "Nix" => "#7e7eff",
        "Objective-C" => "#438eff",
        "OCaml" => "#ef7a08",
        "Perl" => "#0298c3",
        "PHP" => "#4F5D95",
        "PowerShell" => "#012456",
        "Python" => "#3572A5",
        "R" => "#198CE7",
        "Ruby" => "#701516",
        "Rust" => "#dea584",
        "Scala" => "#c22d40",
        "SCSS" => "#c6538c",
        "Shell" => "#89e051",
        "Solidity" => "#AA6746",
        "Svelte" => "#ff3e00",
        "Swift" => "#F05138",
        "TeX" => "#3D6117",
        "TypeScript" => "#3178c6",
        "Vue" => "#41b883",
        "Zig" => "#ec915c",
        _ => FALLBACK_LANGUAGE_COLOR,
    }
}
