use log::debug;
use shader_core::Tokenizer;
use std::collections::BTreeMap;

/// Raw shader bodies of a script, keyed by lower-cased shader name.
///
/// Each value is the shader's source rebuilt from its tokens: the lower-cased
/// name followed by every token of its `{ ... }` block, space separated.
pub type ScriptBodies = BTreeMap<String, String>;

/// Splits a whole script file into one raw body per top-level shader.
///
/// Brace nesting is assumed to be well formed. A name repeated later in the
/// script replaces the earlier body.
pub fn split_script(text: &str) -> ScriptBodies {
    let mut tokens = Tokenizer::new(text);
    let mut bodies = ScriptBodies::new();

    while let Some(name) = tokens.next_token() {
        let name = name.to_ascii_lowercase();
        let mut buffer = format!("{name} ");
        let mut depth: i32 = 0;

        while let Some(token) = tokens.next_token() {
            match token {
                "{" => depth += 1,
                "}" => depth -= 1,
                _ => {}
            }
            buffer.push_str(token);
            buffer.push(' ');

            if depth == 0 {
                break;
            }
        }

        if bodies.insert(name.clone(), buffer).is_some() {
            debug!("Shader '{name}' redefined, keeping the later body");
        }
    }

    debug!("Split script into {} shader bodies", bodies.len());
    bodies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_top_level_blocks() {
        let bodies = split_script(
            "textures/a { { map a.tga } }\n\
             Textures/B { surfaceparm nodraw }",
        );
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies["textures/a"], "textures/a { { map a.tga } } ");
        assert_eq!(bodies["textures/b"], "textures/b { surfaceparm nodraw } ");
    }

    #[test]
    fn later_definition_wins() {
        let bodies = split_script("x { cull none } X { cull back }");
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies["x"], "x { cull back } ");
    }

    #[test]
    fn unterminated_block_takes_rest_of_stream() {
        let bodies = split_script("broken { { map a.tga }");
        assert_eq!(bodies["broken"], "broken { { map a.tga } ");
    }
}
