/// Fixture: handler modules that qualify as endpoints

pub const GET_ALL_RECORDS: &str = r#"
export type Record = { id: string; name: string };
export type GetAllRecordsResponse = Record[];

export default async function getAllRecords(): Promise<GetAllRecordsResponse> {
    return [];
}
"#;

pub const GET_RECORD: &str = r#"
export interface GetRecordRequest {
    id: string;
}

export interface GetRecordResponse {
    id: string;
    name: string;
}

export default async function getRecord(body: GetRecordRequest): Promise<GetRecordResponse> {
    return { id: body.id, name: 'first' };
}
"#;

pub const GET_USER: &str = r#"
type GetUserBody = { id: string };
type User = { id: string; email: string };

export default async function getUser(body: GetUserBody): Promise<User> {
    return { id: body.id, email: 'a@b.c' };
}
"#;

/// Inline object body and keyword return: both become synthesized aliases
pub const STRUCTURAL_TYPES: &str = r#"
export default async function countItems(body: { tags: string[] }): Promise<number> {
    return body.tags.length;
}
"#;

/// Declared separately, exported by name at the bottom
pub const EXPORTED_BY_NAME: &str = r#"
interface PingRequest { message: string }
type PingResponse = { echo: string };

async function ping(body: PingRequest): Promise<PingResponse> {
    return { echo: body.message };
}

export default ping;
"#;

pub const SHARED_TYPES: &str = r#"
export interface User {
    id: string;
    name: string;
}

export type UserQuery = { id: string };
"#;

pub const IMPORTS_SHARED_TYPES: &str = r#"
import { User, UserQuery as Query } from '../shared';

export default async function findUser(body: Query): Promise<User> {
    return { id: body.id, name: 'x' };
}
"#;

/// Same response name as another handler; exercises collision suffixing
pub const LIST_USERS: &str = r#"
export type User = { id: string };
export type ListRequest = { page: number };

export default async function list(body: ListRequest): Promise<User> {
    return { id: String(body.page) };
}
"#;

pub const LIST_ORDERS: &str = r#"
export type User = { id: string; orders: number };
export type ListRequest = { page: number };

export default async function list(body: ListRequest): Promise<User> {
    return { id: '', orders: body.page };
}
"#;
