/// Fixture: modules that must not produce endpoints

pub const ANONYMOUS_DEFAULT: &str = r#"
export type Body = { id: string };
export default async function (body: Body): Promise<Body> {
    return body;
}
"#;

pub const ARROW_DEFAULT: &str = r#"
export type Body = { id: string };
export default async (body: Body): Promise<Body> => body;
"#;

pub const NON_GENERIC_RETURN: &str = r#"
export type Body = { id: string };
export default function notAsync(body: Body): Body {
    return body;
}
"#;

pub const UNRESOLVED_PARAMETER: &str = r#"
import { Missing } from 'some-package';
export type Reply = { ok: boolean };
export default async function usesMissing(body: Missing): Promise<Reply> {
    return { ok: true };
}
"#;

pub const HELPER_MODULE: &str = r#"
export function formatDate(date: Date): string {
    return date.toISOString();
}
"#;

pub const SYNTAX_ERROR: &str = r#"
export default async function broken(body: { id: string ): Promise<void> {
"#;
