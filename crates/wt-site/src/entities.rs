//! Built-in character-entity table.
//!
//! Covers the XML predefined entities plus the HTML 4 named entities a wiki
//! parser commonly resolves. Site configs can add or override names on top
//! of this table.

/// Look up a built-in entity by name.
pub(crate) fn builtin(name: &str) -> Option<&'static str> {
    Some(match name {
        // XML predefined
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",

        // Spacing and dashes
        "nbsp" => "\u{00a0}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "shy" => "\u{00ad}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",

        // Quotation
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",

        // Bullets and ellipses
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",
        "middot" => "\u{00b7}",

        // Arrows
        "larr" => "\u{2190}",
        "uarr" => "\u{2191}",
        "rarr" => "\u{2192}",
        "darr" => "\u{2193}",
        "harr" => "\u{2194}",

        // Math
        "minus" => "\u{2212}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",
        "plusmn" => "\u{00b1}",
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "asymp" => "\u{2248}",
        "equiv" => "\u{2261}",
        "infin" => "\u{221e}",
        "sum" => "\u{2211}",
        "prod" => "\u{220f}",
        "radic" => "\u{221a}",
        "int" => "\u{222b}",
        "part" => "\u{2202}",
        "nabla" => "\u{2207}",
        "isin" => "\u{2208}",
        "notin" => "\u{2209}",
        "cap" => "\u{2229}",
        "cup" => "\u{222a}",
        "sub" => "\u{2282}",
        "sup" => "\u{2283}",
        "sube" => "\u{2286}",
        "supe" => "\u{2287}",
        "forall" => "\u{2200}",
        "exist" => "\u{2203}",
        "empty" => "\u{2205}",
        "and" => "\u{2227}",
        "or" => "\u{2228}",
        "not" => "\u{00ac}",

        // Greek (lowercase)
        "alpha" => "\u{03b1}",
        "beta" => "\u{03b2}",
        "gamma" => "\u{03b3}",
        "delta" => "\u{03b4}",
        "epsilon" => "\u{03b5}",
        "zeta" => "\u{03b6}",
        "eta" => "\u{03b7}",
        "theta" => "\u{03b8}",
        "iota" => "\u{03b9}",
        "kappa" => "\u{03ba}",
        "lambda" => "\u{03bb}",
        "mu" => "\u{03bc}",
        "nu" => "\u{03bd}",
        "xi" => "\u{03be}",
        "pi" => "\u{03c0}",
        "rho" => "\u{03c1}",
        "sigma" => "\u{03c3}",
        "tau" => "\u{03c4}",
        "upsilon" => "\u{03c5}",
        "phi" => "\u{03c6}",
        "chi" => "\u{03c7}",
        "psi" => "\u{03c8}",
        "omega" => "\u{03c9}",

        // Greek (uppercase, commonly used)
        "Gamma" => "\u{0393}",
        "Delta" => "\u{0394}",
        "Theta" => "\u{0398}",
        "Lambda" => "\u{039b}",
        "Xi" => "\u{039e}",
        "Pi" => "\u{03a0}",
        "Sigma" => "\u{03a3}",
        "Phi" => "\u{03a6}",
        "Psi" => "\u{03a8}",
        "Omega" => "\u{03a9}",

        // Legal and currency
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "euro" => "\u{20ac}",
        "pound" => "\u{00a3}",
        "yen" => "\u{00a5}",
        "cent" => "\u{00a2}",

        // Misc
        "deg" => "\u{00b0}",
        "micro" => "\u{00b5}",
        "para" => "\u{00b6}",
        "sect" => "\u{00a7}",
        "dagger" => "\u{2020}",
        "Dagger" => "\u{2021}",
        "permil" => "\u{2030}",
        "prime" => "\u{2032}",
        "Prime" => "\u{2033}",
        "frac14" => "\u{00bc}",
        "frac12" => "\u{00bd}",
        "frac34" => "\u{00be}",
        "sup1" => "\u{00b9}",
        "sup2" => "\u{00b2}",
        "sup3" => "\u{00b3}",
        "ordf" => "\u{00aa}",
        "ordm" => "\u{00ba}",
        "iexcl" => "\u{00a1}",
        "iquest" => "\u{00bf}",

        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_predefined_entities_resolve() {
        assert_eq!(builtin("amp"), Some("&"));
        assert_eq!(builtin("lt"), Some("<"));
        assert_eq!(builtin("gt"), Some(">"));
        assert_eq!(builtin("quot"), Some("\""));
        assert_eq!(builtin("apos"), Some("'"));
    }

    #[test]
    fn named_entities_are_case_sensitive() {
        assert_eq!(builtin("dagger"), Some("\u{2020}"));
        assert_eq!(builtin("Dagger"), Some("\u{2021}"));
        assert_eq!(builtin("DAGGER"), None);
    }

    #[test]
    fn unknown_names_miss() {
        assert_eq!(builtin("nosuchentity"), None);
    }
}
